//! Fixed sample data used to populate a fresh session.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    category::Category,
    expense::{Expense, ExpenseMember},
    group::Group,
    user::User,
    wallet::Wallet,
};

use super::store::ExpenseStore;

impl ExpenseStore {
    /// Builds a store populated with the demo data set: five expenses, two
    /// groups, and one wallet of each kind. The current user is "You".
    pub fn with_sample_data() -> Self {
        let you = User::new("You", "you@example.com");
        let john = User::new("John", "john@example.com");
        let sarah = User::new("Sarah", "sarah@example.com");
        let mike = User::new("Mike", "mike@example.com");
        let lisa = User::new("Lisa", "lisa@example.com");
        let david = User::new("David", "david@example.com");

        let mut movie_buddies = Group::new(
            "Movie Buddies",
            vec![you.clone(), john.clone(), sarah.clone()],
        )
        .with_description("For movie outings and related expenses");
        movie_buddies.created_at = seed_timestamp(2025, 3, 15);
        movie_buddies.total_expenses = 42.00;

        let mut work_team = Group::new(
            "Work Team",
            vec![you.clone(), mike.clone(), lisa.clone(), david.clone()],
        )
        .with_description("For work-related expenses and team outings");
        work_team.created_at = seed_timestamp(2025, 3, 1);
        work_team.total_expenses = 132.75;

        let expenses = vec![
            Expense::new("Groceries", 78.50, Category::Food, seed_date(2025, 4, 1))
                .with_description("Weekly grocery shopping"),
            Expense::new(
                "Movie Night",
                42.00,
                Category::Entertainment,
                seed_date(2025, 4, 2),
            )
            .with_description("Cinema tickets and snacks")
            .shared(
                movie_buddies.id,
                you.id,
                even_split(&[&you, &john, &sarah], 14.00, you.id),
            ),
            Expense::new("Rent", 950.00, Category::Housing, seed_date(2025, 4, 1))
                .with_description("Monthly rent payment"),
            Expense::new("Team Lunch", 132.75, Category::Food, seed_date(2025, 4, 3)).shared(
                work_team.id,
                you.id,
                even_split(&[&you, &mike, &lisa, &david], 33.19, you.id),
            ),
            Expense::new(
                "Electricity Bill",
                85.20,
                Category::Utilities,
                seed_date(2025, 4, 2),
            )
            .with_description("Monthly electricity payment"),
        ];

        let wallets = vec![
            Wallet::spending(1250.00, 2000.00),
            Wallet::savings(3400.00, 5000.00, 800.00),
        ];

        let mut store = ExpenseStore::new(you);
        store.replace_collections(expenses, vec![movie_buddies, work_team], wallets);
        store
    }
}

fn even_split(users: &[&User], share: f64, payer: Uuid) -> Vec<ExpenseMember> {
    users
        .iter()
        .map(|user| ExpenseMember::new(user, share, user.id == payer))
        .collect()
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

fn seed_timestamp(year: i32, month: u32, day: u32) -> chrono::DateTime<chrono::Utc> {
    seed_date(year, month, day)
        .and_hms_opt(0, 0, 0)
        .expect("midnight exists")
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_matches_the_demo_set() {
        let store = ExpenseStore::with_sample_data();
        assert_eq!(store.expenses().len(), 5);
        assert_eq!(store.groups().len(), 2);
        assert_eq!(store.wallets().len(), 2);
        assert_eq!(store.current_user().name, "You");
    }

    #[test]
    fn group_accumulators_match_linked_expenses() {
        let store = ExpenseStore::with_sample_data();
        for group in store.groups() {
            let linked: f64 = store
                .group_expenses(group.id)
                .iter()
                .map(|expense| expense.amount)
                .sum();
            assert!((group.total_expenses - linked).abs() < 1e-9);
        }
    }

    #[test]
    fn one_wallet_of_each_kind_is_seeded() {
        use crate::domain::wallet::WalletKind;
        let store = ExpenseStore::with_sample_data();
        let spending = store.wallet_of_kind(WalletKind::Spending).unwrap();
        let savings = store.wallet_of_kind(WalletKind::Savings).unwrap();
        assert!(spending.monthly_limit.is_some());
        assert!(savings.savings_goal.is_some());
        assert!(savings.fixed_expenses.is_some());
    }
}
