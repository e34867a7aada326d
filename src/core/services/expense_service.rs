//! Business logic helpers for managing expenses.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::expense::{Expense, ExpenseMember, ExpensePatch};
use crate::store::ExpenseStore;

/// Splits may carry a rounding remainder of up to one cent per member.
const SHARE_TOLERANCE_PER_MEMBER: f64 = 0.01;

/// Provides validated CRUD helpers for expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Adds a new expense and returns its identifier.
    pub fn add(store: &mut ExpenseStore, expense: Expense) -> ServiceResult<Uuid> {
        Self::validate_title(&expense.title)?;
        Self::validate_amount(expense.amount)?;
        if expense.is_group {
            let group_id = expense.group_id.ok_or_else(|| {
                ServiceError::Invalid("Group expense is missing its group".into())
            })?;
            if store.group(group_id).is_none() {
                return Err(ServiceError::Invalid(
                    "Group expense references an unknown group".into(),
                ));
            }
            Self::validate_shares(&expense.members, expense.amount)?;
        }
        Ok(store.add_expense(expense))
    }

    /// Merges `patch` into the expense identified by `id`.
    pub fn update(store: &mut ExpenseStore, id: Uuid, patch: ExpensePatch) -> ServiceResult<()> {
        if !patch.has_effect() {
            return Ok(());
        }
        if let Some(title) = &patch.title {
            Self::validate_title(title)?;
        }
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        if let Some(Some(group_id)) = patch.group_id {
            if store.group(group_id).is_none() {
                return Err(ServiceError::Invalid(
                    "Group expense references an unknown group".into(),
                ));
            }
        }
        if let Some(members) = &patch.members {
            let current = store
                .expense(id)
                .ok_or(crate::errors::StoreError::ExpenseNotFound(id))?;
            let amount = patch.amount.unwrap_or(current.amount);
            Self::validate_shares(members, amount)?;
        }
        store.update_expense(id, patch)?;
        Ok(())
    }

    /// Removes the expense identified by `id`, returning the removed instance.
    pub fn remove(store: &mut ExpenseStore, id: Uuid) -> ServiceResult<Expense> {
        Ok(store.delete_expense(id)?)
    }

    /// Returns a snapshot of the store's expenses.
    pub fn list(store: &ExpenseStore) -> Vec<&Expense> {
        store.expenses().iter().collect()
    }

    fn validate_title(title: &str) -> ServiceResult<()> {
        if title.trim().is_empty() {
            Err(ServiceError::Invalid("Title cannot be empty".into()))
        } else {
            Ok(())
        }
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

    fn validate_shares(members: &[ExpenseMember], amount: f64) -> ServiceResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        let total: f64 = members.iter().map(|member| member.amount).sum();
        let tolerance = SHARE_TOLERANCE_PER_MEMBER * members.len() as f64;
        if (total - amount).abs() > tolerance + f64::EPSILON {
            return Err(ServiceError::Invalid(format!(
                "Member shares add up to {:.2}, expected {:.2}",
                total, amount
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{category::Category, group::Group, user::User};
    use chrono::NaiveDate;

    fn base_store() -> ExpenseStore {
        ExpenseStore::new(User::new("You", "you@example.com"))
    }

    fn sample_expense() -> Expense {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        Expense::new("Coffee", 4.20, Category::Food, date)
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let mut store = base_store();
        let mut expense = sample_expense();
        expense.amount = 0.0;
        let err = ExpenseService::add(&mut store, expense).expect_err("zero amount must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn rejects_group_expense_without_known_group() {
        let mut store = base_store();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let expense = Expense::new("Dinner", 60.0, Category::Food, date).shared(
            uuid::Uuid::new_v4(),
            store.current_user().id,
            Vec::new(),
        );
        let err = ExpenseService::add(&mut store, expense).expect_err("dangling group must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn tolerates_one_cent_per_member_of_rounding() {
        let mut store = base_store();
        let you = store.current_user().clone();
        let friend = User::new("Ann", "ann@example.com");
        let group = Group::new("Pair", vec![you.clone(), friend.clone()]);
        let group_id = store.add_group(group);

        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let members = vec![
            ExpenseMember::new(&you, 16.84, true),
            ExpenseMember::new(&friend, 16.84, false),
        ];
        // 2 x 16.84 = 33.68 against 33.67: inside the tolerance.
        let expense = Expense::new("Brunch", 33.67, Category::Food, date).shared(
            group_id,
            you.id,
            members,
        );
        ExpenseService::add(&mut store, expense).expect("rounding remainder is accepted");
    }

    #[test]
    fn rejects_shares_that_drift_too_far() {
        let mut store = base_store();
        let you = store.current_user().clone();
        let friend = User::new("Ann", "ann@example.com");
        let group = Group::new("Pair", vec![you.clone(), friend.clone()]);
        let group_id = store.add_group(group);

        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let members = vec![
            ExpenseMember::new(&you, 10.00, true),
            ExpenseMember::new(&friend, 10.00, false),
        ];
        let expense = Expense::new("Brunch", 33.67, Category::Food, date).shared(
            group_id,
            you.id,
            members,
        );
        let err =
            ExpenseService::add(&mut store, expense).expect_err("mismatched shares must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn remove_returns_deleted_expense() {
        let mut store = base_store();
        let expense = sample_expense();
        let id = ExpenseService::add(&mut store, expense).unwrap();

        let removed = ExpenseService::remove(&mut store, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.expense(id).is_none());
    }
}
