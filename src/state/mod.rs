// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod alert_state;
pub mod app_state;
pub mod information_state;
pub mod session_state;

pub use alert_state::*;
pub use app_state::*;
pub use information_state::*;
pub use session_state::*;
