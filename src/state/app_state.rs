// ============================================================================
// APP STATE - Estado compartido por todas las pantallas de la sesión
// ============================================================================
// Lo crea la raíz de composición (App) y se pasa por referencia a los
// viewmodels; clonar AppState comparte los mismos Rc.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::{AlertState, InformationState, SessionState};

/// Estado global de la aplicación
#[derive(Clone, Default)]
pub struct AppState {
    pub session: SessionState,
    pub information: InformationState,
    pub alert: AlertState,

    // Reactivity: Callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self::default()
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        // Copia de la lista: un callback puede suscribir otro sin pánico de RefCell
        let subscribers: Vec<_> = self.change_subscribers.borrow().iter().cloned().collect();
        for callback in subscribers {
            callback();
        }
    }
}
