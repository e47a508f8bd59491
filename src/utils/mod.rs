// Utils compartidos

pub mod constants;
pub mod cookies;
pub mod format;

pub use constants::*;
pub use format::*;
