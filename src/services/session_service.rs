// ============================================================================
// SESSION SERVICE - Token en memoria + cookie persistente
// ============================================================================
// La cookie `token` sobrevive a las recargas y es la fuente de verdad: sin
// cookie no hay sesión, aunque quede un token en memoria.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CONFIG;
use crate::models::{LoginRequest, RegistrationRequest};
use crate::services::api_client::PpobApi;
use crate::services::error::ApiError;
use crate::state::AppState;
use crate::utils::cookies;

/// Almacenamiento duradero del token
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str, max_age_seconds: u32) -> Result<(), String>;
    fn clear(&self) -> Result<(), String>;
}

/// Token guardado en `document.cookie`
#[derive(Clone)]
pub struct CookieTokenStore {
    name: String,
}

impl CookieTokenStore {
    pub fn new() -> Self {
        Self {
            name: CONFIG.session.token_cookie_name.clone(),
        }
    }
}

impl Default for CookieTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        cookies::read_cookie(&self.name)
    }

    fn save(&self, token: &str, max_age_seconds: u32) -> Result<(), String> {
        cookies::write_cookie(&self.name, token, max_age_seconds)
    }

    fn clear(&self) -> Result<(), String> {
        cookies::delete_cookie(&self.name)
    }
}

/// Token en memoria (tests y hosts sin navegador)
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str, _max_age_seconds: u32) -> Result<(), String> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// Login, registro, logout y resolución del token
#[derive(Clone)]
pub struct SessionService {
    state: AppState,
    api: Rc<dyn PpobApi>,
    store: Rc<dyn TokenStore>,
}

impl SessionService {
    pub fn new(state: AppState, api: Rc<dyn PpobApi>, store: Rc<dyn TokenStore>) -> Self {
        Self { state, api, store }
    }

    /// Token utilizable para la API, o None si no hay cookie.
    ///
    /// Si la cookie existe pero la memoria está vacía, se republica en memoria.
    pub fn resolve_token(&self) -> Option<String> {
        let Some(persisted) = self.store.load() else {
            if self.state.session.is_logged_in() {
                log::warn!("⚠️ Token en memoria sin cookie, sesión descartada");
                self.state.session.clear();
            }
            return None;
        };

        match self.state.session.get_token() {
            Some(token) => Some(token),
            None => {
                log::info!("🔑 Token restaurado desde la cookie");
                self.state.session.set_token(Some(persisted.clone()));
                Some(persisted)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.resolve_token().is_some()
    }

    /// Login: guarda el token en memoria y en la cookie. Devuelve el mensaje del servidor.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let ack = self.api.login(&request).await.map_err(|e| {
            log::error!("❌ Error en login: {}", e);
            e
        })?;

        self.state.session.begin(ack.data.token.clone());
        if let Err(e) = self
            .store
            .save(&ack.data.token, CONFIG.session.token_max_age_seconds)
        {
            log::error!("❌ Error guardando token en cookie: {}", e);
        }
        log::info!("✅ Login correcto para {}", email);
        self.state.notify_subscribers();
        Ok(ack.message)
    }

    /// Registro: no inicia sesión, solo devuelve el mensaje del servidor
    pub async fn register(&self, request: &RegistrationRequest) -> Result<String, ApiError> {
        match self.api.register(request).await {
            Ok(ack) => {
                log::info!("✅ Registro correcto para {}", request.email);
                Ok(ack.message)
            }
            Err(e) => {
                log::error!("❌ Error en registro: {}", e);
                Err(e)
            }
        }
    }

    /// Logout - limpiar token, cookie y todo el caché de la sesión
    pub fn logout(&self) {
        self.state.session.clear();
        if let Err(e) = self.store.clear() {
            log::error!("❌ Error eliminando cookie: {}", e);
        }
        self.state.information.clear();
        log::info!("👋 Logout");
        self.state.notify_subscribers();
    }
}
