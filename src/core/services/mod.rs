pub mod expense_service;
pub mod group_service;
pub mod summary_service;
pub mod wallet_service;

pub use expense_service::ExpenseService;
pub use group_service::GroupService;
pub use summary_service::SummaryService;
pub use wallet_service::WalletService;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Invalid(String),
}
