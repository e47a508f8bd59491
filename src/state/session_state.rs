// ============================================================================
// SESSION STATE - Copia en memoria del token de sesión
// ============================================================================
// La cookie es la fuente de verdad entre recargas; este estado se rehidrata
// desde ella (ver SessionService).
// `epoch` cambia en cada login y logout: una respuesta pedida con un epoch
// anterior pertenece a otra sesión y no se escribe en el estado.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Estado de sesión
#[derive(Clone, Default)]
pub struct SessionState {
    pub token: Rc<RefCell<Option<String>>>,
    epoch: Rc<Cell<u64>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Establecer token
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    /// Obtener token
    pub fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// ¿Sigue siendo la misma sesión que cuando se leyó `epoch`?
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    /// Login - nueva sesión con su token
    pub fn begin(&self, token: String) {
        self.epoch.set(self.epoch.get() + 1);
        self.set_token(Some(token));
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Logout - limpiar token
    pub fn clear(&self) {
        self.epoch.set(self.epoch.get() + 1);
        self.set_token(None);
    }
}
