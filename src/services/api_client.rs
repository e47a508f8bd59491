// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra la API PPOB.
// Los viewmodels dependen del trait `PpobApi`, no de gloo-net.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::config::CONFIG;
use crate::models::{
    ApiResponse, AvatarUpload, BalanceData, Banner, ErrorBody, HistoryPage, KeyedSeq, LoginData,
    LoginRequest, Profile, RegistrationRequest, Service, TopUpRequest, TransactionReceipt,
    TransactionRecord, TransactionRequest, UpdateProfileRequest,
};
use crate::services::error::ApiError;

/// Respuesta exitosa con el `message` del servidor (para la alerta de la UI)
#[derive(Debug, Clone, PartialEq)]
pub struct Ack<T> {
    pub message: String,
    pub data: T,
}

/// Operaciones lógicas de la API remota
#[async_trait(?Send)]
pub trait PpobApi {
    async fn register(&self, request: &RegistrationRequest) -> Result<Ack<()>, ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<Ack<LoginData>, ApiError>;

    async fn get_profile(&self, token: &str) -> Result<Profile, ApiError>;
    async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Ack<Profile>, ApiError>;
    async fn upload_profile_image(
        &self,
        token: &str,
        upload: &AvatarUpload,
    ) -> Result<Ack<Profile>, ApiError>;

    async fn get_balance(&self, token: &str) -> Result<u64, ApiError>;
    /// Devuelve el saldo resultante
    async fn top_up(&self, token: &str, amount: u64) -> Result<Ack<u64>, ApiError>;

    async fn get_services(&self, token: &str) -> Result<Vec<Service>, ApiError>;
    async fn get_banners(&self, token: &str) -> Result<Vec<Banner>, ApiError>;

    async fn create_transaction(
        &self,
        token: &str,
        service_code: &str,
    ) -> Result<Ack<TransactionReceipt>, ApiError>;
    async fn get_transaction_history(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ApiError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(request: Request) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<ApiResponse<T>, ApiError> {
        log::debug!("📡 GET {}", path);
        let request = Request::get(&self.url(path))
            .header("Authorization", &bearer(token))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_envelope(Self::send(request).await?).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl PpobApi for ApiClient {
    async fn register(&self, request: &RegistrationRequest) -> Result<Ack<()>, ApiError> {
        log::info!("📝 Registrando usuario: {}", request.email);
        let request = Request::post(&self.url("/registration"))
            .json(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let envelope: ApiResponse<serde_json::Value> = read_envelope(Self::send(request).await?).await?;
        let envelope = check_status(envelope)?;
        Ok(Ack { message: envelope.message, data: () })
    }

    async fn login(&self, request: &LoginRequest) -> Result<Ack<LoginData>, ApiError> {
        log::info!("🔐 Login para: {}", request.email);
        let request = Request::post(&self.url("/login"))
            .json(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        into_ack(read_envelope(Self::send(request).await?).await?)
    }

    async fn get_profile(&self, token: &str) -> Result<Profile, ApiError> {
        into_data(self.get("/profile", token).await?)
    }

    async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Ack<Profile>, ApiError> {
        log::info!("✏️ Actualizando perfil de {}", request.email);
        let request = Request::put(&self.url("/profile/update"))
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        into_ack(read_envelope(Self::send(request).await?).await?)
    }

    async fn upload_profile_image(
        &self,
        token: &str,
        upload: &AvatarUpload,
    ) -> Result<Ack<Profile>, ApiError> {
        log::info!("🖼️ Subiendo foto de perfil: {} ({} bytes)", upload.file_name, upload.bytes.len());
        let form = avatar_form_data(upload)?;
        // Sin Content-Type explícito: el navegador agrega el boundary del multipart
        let request = Request::put(&self.url("/profile/image"))
            .header("Authorization", &bearer(token))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        into_ack(read_envelope(Self::send(request).await?).await?)
    }

    async fn get_balance(&self, token: &str) -> Result<u64, ApiError> {
        let data: BalanceData = into_data(self.get("/balance", token).await?)?;
        Ok(data.balance)
    }

    async fn top_up(&self, token: &str, amount: u64) -> Result<Ack<u64>, ApiError> {
        log::info!("💰 Top up de {}", amount);
        let request = Request::post(&self.url("/topup"))
            .header("Authorization", &bearer(token))
            .json(&TopUpRequest { top_up_amount: amount })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let ack: Ack<BalanceData> = into_ack(read_envelope(Self::send(request).await?).await?)?;
        Ok(Ack { message: ack.message, data: ack.data.balance })
    }

    async fn get_services(&self, token: &str) -> Result<Vec<Service>, ApiError> {
        into_data(self.get("/services", token).await?)
    }

    async fn get_banners(&self, token: &str) -> Result<Vec<Banner>, ApiError> {
        let banners: KeyedSeq<Banner> = into_data(self.get("/banner", token).await?)?;
        Ok(banners.into_vec())
    }

    async fn create_transaction(
        &self,
        token: &str,
        service_code: &str,
    ) -> Result<Ack<TransactionReceipt>, ApiError> {
        log::info!("🧾 Pagando servicio {}", service_code);
        let request = Request::post(&self.url("/transaction"))
            .header("Authorization", &bearer(token))
            .json(&TransactionRequest { service_code: service_code.to_string() })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        into_ack(read_envelope(Self::send(request).await?).await?)
    }

    async fn get_transaction_history(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        log::debug!("📡 GET /transaction/history offset={} limit={}", offset, limit);
        let request = Request::get(&self.url("/transaction/history"))
            .header("Authorization", &bearer(token))
            .query([("offset", offset.to_string()), ("limit", limit.to_string())])
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let page: HistoryPage = into_data(read_envelope(Self::send(request).await?).await?)?;
        Ok(page.records)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Rejected(format!("{:?}", value))
}

fn avatar_form_data(upload: &AvatarUpload) -> Result<FormData, ApiError> {
    let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&upload.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", &blob, &upload.file_name)
        .map_err(js_error)?;
    Ok(form)
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(http_error(status, &response.status_text(), &body));
    }
    decode_envelope(&body)
}

/// Error de un HTTP no-2xx, con el `message` del cuerpo si lo trae
pub(crate) fn http_error(status: u16, status_text: &str, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status_text.to_string());
    ApiError::Http { status, message }
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn check_status<T>(envelope: ApiResponse<T>) -> Result<ApiResponse<T>, ApiError> {
    if envelope.is_success() {
        Ok(envelope)
    } else {
        Err(ApiError::Application {
            status: envelope.status,
            message: envelope.message,
        })
    }
}

pub(crate) fn into_ack<T>(envelope: ApiResponse<T>) -> Result<Ack<T>, ApiError> {
    let envelope = check_status(envelope)?;
    match envelope.data {
        Some(data) => Ok(Ack { message: envelope.message, data }),
        None => Err(ApiError::Decode("respuesta sin data".to_string())),
    }
}

pub(crate) fn into_data<T>(envelope: ApiResponse<T>) -> Result<T, ApiError> {
    into_ack(envelope).map(|ack| ack.data)
}
