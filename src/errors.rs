use thiserror::Error;
use uuid::Uuid;

use crate::domain::wallet::WalletKind;

/// Error type that captures store-level failures.
///
/// Missing referenced entities are explicit outcomes rather than silent
/// no-ops so caller bugs surface instead of being absorbed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("group not found: {0}")]
    GroupNotFound(Uuid),
    #[error("no {0} wallet available")]
    WalletMissing(WalletKind),
    #[error("wallet not found: {0}")]
    WalletNotFound(Uuid),
    #[error("insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },
}
