pub mod account_viewmodel;
pub mod checkout_viewmodel;
pub mod data_loader;
pub mod history_viewmodel;
pub mod topup_viewmodel;

pub use account_viewmodel::AccountViewModel;
pub use checkout_viewmodel::{CheckoutViewModel, PaymentDialog};
pub use data_loader::{DataLoader, LoadOutcome, LoadReport, LoaderStatus, Resource};
pub use history_viewmodel::{HistoryPaginator, PageOutcome};
pub use topup_viewmodel::{TopUpPreset, TopUpViewModel};
