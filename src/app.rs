// ============================================================================
// APP - Raíz de composición
// ============================================================================
// Crea el AppState y lo comparte con el servicio de sesión y los viewmodels.
// La capa de vista (JS) solo lee `snapshot()` y llama a las operaciones.
// ============================================================================

use std::rc::Rc;

use serde::Serialize;

use crate::models::{Profile, TransactionRecord};
use crate::services::{ApiClient, ApiError, CookieTokenStore, PpobApi, SessionService, TokenStore};
use crate::state::{Alert, AlertKind, AppState, InformationSnapshot};
use crate::utils::format_rupiah;
use crate::viewmodels::{
    AccountViewModel, CheckoutViewModel, DataLoader, HistoryPaginator, LoaderStatus, PageOutcome,
    PaymentDialog, TopUpViewModel,
};

/// Todo lo que la vista necesita para pintar cualquier pantalla
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub logged_in: bool,
    pub loading: bool,
    pub loader_status: LoaderStatus,
    pub information: InformationSnapshot,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub balance_label: Option<String>,
    pub alert: Option<Alert>,
    pub editing_profile: bool,
    pub payment: PaymentDialog,
    pub history: HistorySnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySnapshot {
    pub records: Vec<HistoryRow>,
    pub has_more: bool,
    pub loading_page: bool,
}

/// Registro del historial con su monto ya formateado ("+ Rp.10.000")
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    #[serde(flatten)]
    pub record: TransactionRecord,
    pub amount_label: String,
}

impl From<TransactionRecord> for HistoryRow {
    fn from(record: TransactionRecord) -> Self {
        Self {
            amount_label: record.signed_amount_label(),
            record,
        }
    }
}

/// Aplicación principal
#[derive(Clone)]
pub struct App {
    state: AppState,
    pub session: SessionService,
    pub loader: DataLoader,
    pub history: HistoryPaginator,
    pub account: AccountViewModel,
    pub topup: TopUpViewModel,
    pub checkout: CheckoutViewModel,
}

impl App {
    /// App del navegador: API REST real + cookie
    pub fn new() -> Self {
        Self::with_backends(Rc::new(ApiClient::new()), Rc::new(CookieTokenStore::new()))
    }

    pub fn with_backends(api: Rc<dyn PpobApi>, store: Rc<dyn TokenStore>) -> Self {
        let state = AppState::new();
        let session = SessionService::new(state.clone(), api.clone(), store);
        Self {
            loader: DataLoader::new(state.clone(), api.clone(), session.clone()),
            history: HistoryPaginator::new(api.clone()),
            account: AccountViewModel::new(state.clone(), api.clone(), session.clone()),
            topup: TopUpViewModel::new(state.clone(), api.clone(), session.clone()),
            checkout: CheckoutViewModel::new(state.clone(), api, session.clone()),
            session,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let information = self.state.information.snapshot();
        AppSnapshot {
            logged_in: self.state.session.is_logged_in(),
            loading: self.loader.is_loading(),
            loader_status: self.loader.status(),
            display_name: information.profile.as_ref().map(Profile::full_name),
            avatar_url: information.profile.as_ref().map(|p| p.avatar_url().to_string()),
            balance_label: information.balance.map(format_rupiah),
            information,
            alert: self.state.alert.current(),
            editing_profile: self.account.is_editing(),
            payment: self.checkout.dialog(),
            history: HistorySnapshot {
                records: self.history.records().into_iter().map(HistoryRow::from).collect(),
                has_more: self.history.has_more(),
                loading_page: self.history.is_loading_page(),
            },
        }
    }

    /// Convierte el resultado de una operación en alerta; devuelve su generación
    pub fn report(&self, result: &Result<String, ApiError>) -> u64 {
        let generation = match result {
            Ok(message) => self.state.alert.show(AlertKind::Success, message.clone()),
            Err(e) => self.state.alert.show(AlertKind::Error, e.user_message()),
        };
        self.state.notify_subscribers();
        generation
    }

    /// Primera página del historial al entrar a la pantalla
    pub async fn open_history(&self) -> Result<PageOutcome, ApiError> {
        let token = self.session.resolve_token();
        let outcome = self.history.start(token.as_deref()).await;
        self.state.notify_subscribers();
        outcome
    }

    /// Botón "Show More"
    pub async fn show_more(&self) -> Result<PageOutcome, ApiError> {
        let token = self.session.resolve_token();
        let outcome = self.history.load_next_page(token.as_deref()).await;
        self.state.notify_subscribers();
        outcome
    }

    pub fn leave_history(&self) {
        self.history.reset();
    }

    pub fn logout(&self) {
        self.history.reset();
        self.checkout.close();
        self.account.cancel_edit();
        self.session.logout();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
