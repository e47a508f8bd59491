// ============================================================================
// ALERT STATE - Mensaje transitorio (éxito / error) para la UI
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Clone, Default)]
pub struct AlertState {
    current: Rc<RefCell<Option<Alert>>>,
    generation: Rc<Cell<u64>>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Muestra una alerta y devuelve su generación (para descartarla después)
    pub fn show(&self, kind: AlertKind, message: impl Into<String>) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.current.borrow_mut() = Some(Alert { kind, message: message.into() });
        generation
    }

    pub fn current(&self) -> Option<Alert> {
        self.current.borrow().clone()
    }

    /// Cierra la alerta solo si sigue siendo la misma; `true` si se cerró
    pub fn dismiss(&self, generation: u64) -> bool {
        if self.generation.get() != generation {
            return false;
        }
        self.current.borrow_mut().take().is_some()
    }
}
