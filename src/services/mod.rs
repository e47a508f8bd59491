pub mod api_client;
pub mod error;
pub mod session_service;

#[cfg(test)]
pub mod mock;

pub use api_client::{Ack, ApiClient, PpobApi};
pub use error::ApiError;
pub use session_service::{CookieTokenStore, MemoryTokenStore, SessionService, TokenStore};
