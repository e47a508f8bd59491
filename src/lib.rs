// ============================================================================
// SIMS PPOB - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: Estado de pantalla + lógica UI
// - Services: SOLO comunicación API y sesión
// - State: State Management con Rc<RefCell> + suscriptores
// - Models: Estructuras del API REST
// La vista (JS) consume `PpobApp`: cada operación devuelve una Promise y
// `snapshot()` entrega el estado completo en JSON.
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

use gloo_timers::callback::Timeout;
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::models::{AvatarUpload, RegistrationRequest};
use crate::services::ApiError;
use crate::viewmodels::{LoadOutcome, PageOutcome, TopUpViewModel};

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 SIMS PPOB - Rust + WASM ({})", CONFIG.environment);
    log::debug!("🌐 API: {}", CONFIG.api_url());
    Ok(())
}

/// Puente JS <-> App
#[wasm_bindgen]
pub struct PpobApp {
    app: App,
}

#[wasm_bindgen]
impl PpobApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PpobApp {
        PpobApp { app: App::new() }
    }

    /// Estado completo en JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// El callback se invoca tras cada cambio de estado
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        self.app.state().subscribe_to_changes(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::error!("❌ Error en callback onChange: {:?}", e);
            }
        });
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.app.session.is_authenticated()
    }

    /// Carga inicial de una pantalla protegida. Resuelve `false` si hay que ir a /login
    /// (sin sesión, o la sesión terminó durante la carga).
    pub fn load(&self) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let outcome = app.loader.load().await;
            app.state().notify_subscribers();
            Ok(JsValue::from_bool(matches!(outcome, LoadOutcome::Loaded(_))))
        })
    }

    pub fn login(&self, email: String, password: String) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let result = app.session.login(&email, &password).await;
            settle(&app, result)
        })
    }

    pub fn register(
        &self,
        email: String,
        first_name: String,
        last_name: String,
        password: String,
    ) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let request = RegistrationRequest { email, first_name, last_name, password };
            let result = app.session.register(&request).await;
            settle(&app, result)
        })
    }

    pub fn logout(&self) {
        self.app.logout();
    }

    #[wasm_bindgen(js_name = openHistory)]
    pub fn open_history(&self) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move { page_result(&app, app.open_history().await) })
    }

    /// Botón "Show More". Resuelve con el número de registros agregados.
    #[wasm_bindgen(js_name = showMore)]
    pub fn show_more(&self) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move { page_result(&app, app.show_more().await) })
    }

    #[wasm_bindgen(js_name = leaveHistory)]
    pub fn leave_history(&self) {
        self.app.leave_history();
    }

    #[wasm_bindgen(js_name = topUpPresets)]
    pub fn top_up_presets(&self) -> Result<String, JsValue> {
        serde_json::to_string(&TopUpViewModel::presets()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = topUp)]
    pub fn top_up(&self, amount: u32) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let result = app.topup.submit(u64::from(amount)).await;
            settle(&app, result)
        })
    }

    #[wasm_bindgen(js_name = selectService)]
    pub fn select_service(&self, service_code: String) -> Result<(), JsValue> {
        let result = self.app.checkout.select(&service_code);
        self.app.state().notify_subscribers();
        result.map_err(|e| JsValue::from_str(&e.user_message()))
    }

    #[wasm_bindgen(js_name = cancelPayment)]
    pub fn cancel_payment(&self) {
        self.app.checkout.cancel();
        self.app.state().notify_subscribers();
    }

    #[wasm_bindgen(js_name = confirmPayment)]
    pub fn confirm_payment(&self) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            // el resultado se muestra en el propio diálogo, sin alerta
            let result = app.checkout.confirm().await;
            result.map(|message| JsValue::from_str(&message)).map_err(reject)
        })
    }

    #[wasm_bindgen(js_name = closePayment)]
    pub fn close_payment(&self) {
        self.app.checkout.close();
        self.app.state().notify_subscribers();
    }

    #[wasm_bindgen(js_name = startEdit)]
    pub fn start_edit(&self) {
        self.app.account.start_edit();
        self.app.state().notify_subscribers();
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&self) {
        self.app.account.cancel_edit();
        self.app.state().notify_subscribers();
    }

    #[wasm_bindgen(js_name = updateProfile)]
    pub fn update_profile(&self, first_name: String, last_name: String) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let result = app.account.update_profile(&first_name, &last_name).await;
            settle(&app, result)
        })
    }

    #[wasm_bindgen(js_name = uploadAvatar)]
    pub fn upload_avatar(&self, file_name: String, content_type: String, bytes: Vec<u8>) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let upload = AvatarUpload { file_name, content_type, bytes };
            let result = app.account.upload_avatar(&upload).await;
            settle(&app, result)
        })
    }
}

impl Default for PpobApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Muestra la alerta del resultado y programa su cierre
fn settle(app: &App, result: Result<String, ApiError>) -> Result<JsValue, JsValue> {
    let generation = app.report(&result);
    let state = app.state().clone();
    Timeout::new(CONFIG.ui_config.alert_dismiss_ms, move || {
        if state.alert.dismiss(generation) {
            state.notify_subscribers();
        }
    })
    .forget();
    result.map(|message| JsValue::from_str(&message)).map_err(reject)
}

fn page_result(app: &App, result: Result<PageOutcome, ApiError>) -> Result<JsValue, JsValue> {
    match result {
        Ok(PageOutcome::Appended(count)) => Ok(JsValue::from_f64(count as f64)),
        Ok(_) => Ok(JsValue::from_f64(0.0)),
        Err(ApiError::Unauthenticated) => Err(reject(ApiError::Unauthenticated)),
        Err(e) => settle(app, Err(e)),
    }
}

fn reject(error: ApiError) -> JsValue {
    JsValue::from_str(&error.user_message())
}
