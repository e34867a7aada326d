use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::wallet::{Wallet, WalletKind, WalletPatch};
use crate::errors::StoreError;
use crate::store::ExpenseStore;

/// Validated operations on the two wallet balances.
pub struct WalletService;

impl WalletService {
    /// Moves funds from the spending wallet into savings.
    pub fn transfer_to_savings(store: &mut ExpenseStore, amount: f64) -> ServiceResult<()> {
        Self::validate_amount(amount)?;
        store.transfer_to_savings(amount)?;
        Ok(())
    }

    /// Moves funds from savings back into the spending wallet.
    pub fn use_savings(store: &mut ExpenseStore, amount: f64) -> ServiceResult<()> {
        Self::validate_amount(amount)?;
        store.use_savings(amount)?;
        Ok(())
    }

    pub fn set_monthly_limit(store: &mut ExpenseStore, limit: f64) -> ServiceResult<()> {
        Self::validate_figure(limit)?;
        let id = Self::wallet_id(store, WalletKind::Spending)?;
        let patch = WalletPatch {
            monthly_limit: Some(Some(limit)),
            ..WalletPatch::default()
        };
        store.update_wallet(id, patch)?;
        Ok(())
    }

    pub fn set_savings_goal(store: &mut ExpenseStore, goal: f64) -> ServiceResult<()> {
        Self::validate_figure(goal)?;
        let id = Self::wallet_id(store, WalletKind::Savings)?;
        let patch = WalletPatch {
            savings_goal: Some(Some(goal)),
            ..WalletPatch::default()
        };
        store.update_wallet(id, patch)?;
        Ok(())
    }

    pub fn set_fixed_expenses(store: &mut ExpenseStore, figure: f64) -> ServiceResult<()> {
        Self::validate_figure(figure)?;
        let id = Self::wallet_id(store, WalletKind::Savings)?;
        let patch = WalletPatch {
            fixed_expenses: Some(Some(figure)),
            ..WalletPatch::default()
        };
        store.update_wallet(id, patch)?;
        Ok(())
    }

    /// Adds funds directly to the wallet of `kind`.
    pub fn deposit(store: &mut ExpenseStore, kind: WalletKind, amount: f64) -> ServiceResult<()> {
        Self::validate_amount(amount)?;
        let wallet = Self::wallet(store, kind)?;
        let id = wallet.id;
        let balance = wallet.amount + amount;
        let patch = WalletPatch {
            amount: Some(balance),
            ..WalletPatch::default()
        };
        store.update_wallet(id, patch)?;
        Ok(())
    }

    pub fn list(store: &ExpenseStore) -> Vec<&Wallet> {
        store.wallets().iter().collect()
    }

    fn wallet(store: &ExpenseStore, kind: WalletKind) -> Result<&Wallet, StoreError> {
        store
            .wallet_of_kind(kind)
            .ok_or(StoreError::WalletMissing(kind))
    }

    fn wallet_id(store: &ExpenseStore, kind: WalletKind) -> Result<uuid::Uuid, StoreError> {
        Self::wallet(store, kind).map(|wallet| wallet.id)
    }

    fn validate_amount(amount: f64) -> ServiceResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            Err(ServiceError::Invalid(
                "Amount must be greater than 0".into(),
            ))
        } else {
            Ok(())
        }
    }

    fn validate_figure(figure: f64) -> ServiceResult<()> {
        if !figure.is_finite() || figure < 0.0 {
            Err(ServiceError::Invalid("Amount cannot be negative".into()))
        } else {
            Ok(())
        }
    }
}
