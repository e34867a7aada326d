use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::expense::Expense;
use crate::store::{
    CategoryShare, DailyTotal, ExpenseScope, ExpenseStore, ExpenseSummary, GroupBalanceSummary,
    MemberBalance, MonthlyTotal,
};

use super::{ServiceError, ServiceResult};

pub struct SummaryService;

impl SummaryService {
    pub fn overview(store: &ExpenseStore, reference: NaiveDate) -> ExpenseSummary {
        store.expense_summary(reference)
    }

    pub fn group_balances(store: &ExpenseStore) -> Vec<GroupBalanceSummary> {
        store.group_balance_summaries()
    }

    pub fn member_balances(
        store: &ExpenseStore,
        group_id: Uuid,
    ) -> ServiceResult<Vec<MemberBalance>> {
        store.member_balances(group_id).map_err(ServiceError::from)
    }

    pub fn category_breakdown(store: &ExpenseStore) -> Vec<CategoryShare> {
        store.category_breakdown()
    }

    pub fn monthly_totals(
        store: &ExpenseStore,
        reference: NaiveDate,
        months: u32,
    ) -> ServiceResult<Vec<MonthlyTotal>> {
        if months == 0 {
            return Err(ServiceError::Invalid(
                "Trend window must cover at least one month".into(),
            ));
        }
        Ok(store.monthly_totals(reference, months))
    }

    pub fn daily_totals(
        store: &ExpenseStore,
        reference: NaiveDate,
        days: u32,
        category: Option<Category>,
    ) -> ServiceResult<Vec<DailyTotal>> {
        if days == 0 {
            return Err(ServiceError::Invalid(
                "Trend window must cover at least one day".into(),
            ));
        }
        Ok(store.daily_totals(reference, days, category))
    }

    pub fn recent(store: &ExpenseStore, limit: usize) -> Vec<&Expense> {
        store.recent_expenses(limit)
    }

    pub fn filtered<'a>(
        store: &'a ExpenseStore,
        scope: ExpenseScope,
        query: Option<&str>,
    ) -> Vec<&'a Expense> {
        store.filtered_expenses(scope, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
    }

    #[test]
    fn zero_width_windows_are_rejected() {
        let store = ExpenseStore::with_sample_data();
        assert!(SummaryService::monthly_totals(&store, reference(), 0).is_err());
        assert!(SummaryService::daily_totals(&store, reference(), 0, None).is_err());
    }

    #[test]
    fn member_balances_require_a_known_group() {
        let store = ExpenseStore::with_sample_data();
        let err = SummaryService::member_balances(&store, Uuid::new_v4())
            .expect_err("unknown group must be reported");
        assert!(matches!(
            err,
            ServiceError::Store(crate::errors::StoreError::GroupNotFound(_))
        ));
    }
}
