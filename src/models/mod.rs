pub mod api;
pub mod auth;
pub mod catalog;
pub mod keyed;
pub mod profile;
pub mod transaction;

pub use api::{ApiResponse, ErrorBody};
pub use auth::{LoginData, LoginRequest, RegistrationRequest};
pub use catalog::{BalanceData, Banner, Service};
pub use keyed::KeyedSeq;
pub use profile::{AvatarUpload, Profile, UpdateProfileRequest};
pub use transaction::{
    HistoryPage, TopUpRequest, TransactionReceipt, TransactionRecord, TransactionRequest,
    TransactionType,
};
