// API en memoria para tests: cuenta llamadas por endpoint y permite
// programar fallos y tamaños de página del historial.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::models::{
    AvatarUpload, Banner, LoginData, LoginRequest, Profile, RegistrationRequest, Service,
    TransactionReceipt, TransactionRecord, TransactionType, UpdateProfileRequest,
};
use crate::services::api_client::{Ack, PpobApi};
use crate::services::error::ApiError;

pub struct MockApi {
    calls: RefCell<HashMap<&'static str, usize>>,
    failures: RefCell<HashMap<&'static str, ApiError>>,
    history_sizes: RefCell<Vec<usize>>,
    history_requests: RefCell<Vec<(usize, usize)>>,
    balance: Cell<u64>,
    yield_before_reply: Cell<bool>,
}

impl MockApi {
    pub const TOKEN: &'static str = "mock-jwt";

    pub fn new() -> Self {
        Self {
            calls: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            history_sizes: RefCell::new(Vec::new()),
            history_requests: RefCell::new(Vec::new()),
            balance: Cell::new(100_000),
            yield_before_reply: Cell::new(false),
        }
    }

    /// Página `i` del historial devuelve `sizes[i]` registros (0 después)
    pub fn with_history_sizes(sizes: &[usize]) -> Self {
        let api = Self::new();
        *api.history_sizes.borrow_mut() = sizes.to_vec();
        api
    }

    /// Cada respuesta cede el control una vez antes de resolverse
    pub fn yielding(self) -> Self {
        self.yield_before_reply.set(true);
        self
    }

    pub fn fail(&self, endpoint: &'static str, error: ApiError) {
        self.failures.borrow_mut().insert(endpoint, error);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.failures.borrow_mut().remove(endpoint);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.borrow().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    pub fn history_requests(&self) -> Vec<(usize, usize)> {
        self.history_requests.borrow().clone()
    }

    pub fn profile() -> Profile {
        Profile {
            email: "user@nutech-integrasi.com".into(),
            first_name: "User".into(),
            last_name: "Nutech".into(),
            profile_image: "https://minio.nutech-integrasi.com/take-home-test/null".into(),
        }
    }

    pub fn services() -> Vec<Service> {
        vec![
            Service {
                service_code: "PAJAK".into(),
                service_name: "Pajak PBB".into(),
                service_icon: "https://nutech-integrasi.app/dummy.jpg".into(),
                service_tariff: 40_000,
            },
            Service {
                service_code: "PLN".into(),
                service_name: "Listrik".into(),
                service_icon: "https://nutech-integrasi.app/dummy.jpg".into(),
                service_tariff: 10_000,
            },
        ]
    }

    pub fn banners() -> Vec<Banner> {
        (1..=2)
            .map(|i| Banner {
                banner_name: format!("Banner {}", i),
                banner_image: format!("https://nutech-integrasi.app/banner-{}.jpg", i),
                description: "Lerem Ipsum Dolor sit amet".into(),
            })
            .collect()
    }

    pub fn record(index: usize) -> TransactionRecord {
        TransactionRecord {
            invoice_number: format!("INV17082023-{:03}", index),
            transaction_type: if index % 2 == 0 { TransactionType::Topup } else { TransactionType::Payment },
            description: "Top Up balance".into(),
            total_amount: 10_000,
            created_on: Utc.with_ymd_and_hms(2023, 8, 17, 10, 10, 10).unwrap(),
        }
    }

    async fn enter(&self, endpoint: &'static str) -> Result<(), ApiError> {
        *self.calls.borrow_mut().entry(endpoint).or_insert(0) += 1;
        if self.yield_before_reply.get() {
            YieldOnce(false).await;
        }
        match self.failures.borrow().get(endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[async_trait(?Send)]
impl PpobApi for MockApi {
    async fn register(&self, _request: &RegistrationRequest) -> Result<Ack<()>, ApiError> {
        self.enter("register").await?;
        Ok(Ack { message: "Registrasi berhasil silahkan login".into(), data: () })
    }

    async fn login(&self, _request: &LoginRequest) -> Result<Ack<LoginData>, ApiError> {
        self.enter("login").await?;
        Ok(Ack { message: "Login Sukses".into(), data: LoginData { token: Self::TOKEN.into() } })
    }

    async fn get_profile(&self, _token: &str) -> Result<Profile, ApiError> {
        self.enter("profile").await?;
        Ok(Self::profile())
    }

    async fn update_profile(
        &self,
        _token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Ack<Profile>, ApiError> {
        self.enter("profile_update").await?;
        Ok(Ack {
            message: "Update Pofile berhasil".into(),
            data: Profile {
                email: request.email.clone(),
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                ..Self::profile()
            },
        })
    }

    async fn upload_profile_image(
        &self,
        _token: &str,
        upload: &AvatarUpload,
    ) -> Result<Ack<Profile>, ApiError> {
        self.enter("profile_image").await?;
        Ok(Ack {
            message: "Update Profile Image berhasil".into(),
            data: Profile {
                profile_image: format!("https://minio.nutech-integrasi.com/take-home-test/{}", upload.file_name),
                ..Self::profile()
            },
        })
    }

    async fn get_balance(&self, _token: &str) -> Result<u64, ApiError> {
        self.enter("balance").await?;
        Ok(self.balance.get())
    }

    async fn top_up(&self, _token: &str, amount: u64) -> Result<Ack<u64>, ApiError> {
        self.enter("topup").await?;
        self.balance.set(self.balance.get() + amount);
        Ok(Ack { message: "Top Up Balance berhasil".into(), data: self.balance.get() })
    }

    async fn get_services(&self, _token: &str) -> Result<Vec<Service>, ApiError> {
        self.enter("services").await?;
        Ok(Self::services())
    }

    async fn get_banners(&self, _token: &str) -> Result<Vec<Banner>, ApiError> {
        self.enter("banner").await?;
        Ok(Self::banners())
    }

    async fn create_transaction(
        &self,
        _token: &str,
        service_code: &str,
    ) -> Result<Ack<TransactionReceipt>, ApiError> {
        self.enter("transaction").await?;
        let service = Self::services()
            .into_iter()
            .find(|s| s.service_code == service_code)
            .ok_or_else(|| ApiError::Application {
                status: 102,
                message: "Service ataus Layanan tidak ditemukan".into(),
            })?;
        if self.balance.get() < service.service_tariff {
            return Err(ApiError::Application { status: 102, message: "Saldo tidak mencukupi".into() });
        }
        self.balance.set(self.balance.get() - service.service_tariff);
        Ok(Ack {
            message: "Transaksi berhasil".into(),
            data: TransactionReceipt {
                invoice_number: "INV17082023-001".into(),
                service_code: service.service_code,
                service_name: service.service_name,
                transaction_type: TransactionType::Payment,
                total_amount: service.service_tariff,
                created_on: Utc.with_ymd_and_hms(2023, 8, 17, 10, 10, 10).unwrap(),
            },
        })
    }

    async fn get_transaction_history(
        &self,
        _token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        self.history_requests.borrow_mut().push((offset, limit));
        self.enter("history").await?;
        let page = if limit == 0 { 0 } else { offset / limit };
        let size = self.history_sizes.borrow().get(page).copied().unwrap_or(0);
        Ok((offset..offset + size).map(Self::record).collect())
    }
}
