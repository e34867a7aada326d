use chrono::NaiveDate;
use expense_core::domain::{
    category::Category,
    expense::{Expense, ExpensePatch},
    group::Group,
    user::User,
    wallet::WalletKind,
};
use expense_core::errors::StoreError;
use expense_core::store::ExpenseStore;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn store_with_group() -> (ExpenseStore, uuid::Uuid) {
    let you = User::new("You", "you@example.com");
    let friend = User::new("John", "john@example.com");
    let mut store = ExpenseStore::new(you.clone());
    let group_id = store.add_group(Group::new("Housemates", vec![you, friend]));
    (store, group_id)
}

fn group_expense(group_id: uuid::Uuid, payer: uuid::Uuid, amount: f64) -> Expense {
    Expense::new("Shared", amount, Category::Other, date(2025, 4, 5)).shared(
        group_id,
        payer,
        Vec::new(),
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn group_total_tracks_adds_and_deletes() {
    let (mut store, group_id) = store_with_group();
    let payer = store.current_user().id;

    let first = store.add_expense(group_expense(group_id, payer, 60.0));
    store.add_expense(group_expense(group_id, payer, 25.5));
    assert_close(store.group(group_id).unwrap().total_expenses, 85.5);

    store.delete_expense(first).unwrap();
    assert_close(store.group(group_id).unwrap().total_expenses, 25.5);

    let linked: f64 = store
        .group_expenses(group_id)
        .iter()
        .map(|expense| expense.amount)
        .sum();
    assert_close(store.group(group_id).unwrap().total_expenses, linked);
}

#[test]
fn update_reconciles_group_totals() {
    let (mut store, group_id) = store_with_group();
    let payer = store.current_user().id;
    let id = store.add_expense(group_expense(group_id, payer, 60.0));

    let patch = ExpensePatch {
        amount: Some(80.0),
        ..ExpensePatch::default()
    };
    store.update_expense(id, patch).unwrap();
    assert_close(store.group(group_id).unwrap().total_expenses, 80.0);

    // Turning the expense personal rolls it out of the accumulator.
    let patch = ExpensePatch {
        is_group: Some(false),
        ..ExpensePatch::default()
    };
    store.update_expense(id, patch).unwrap();
    assert_close(store.group(group_id).unwrap().total_expenses, 0.0);
}

#[test]
fn update_moves_amount_between_groups() {
    let (mut store, first_group) = store_with_group();
    let you = store.current_user().clone();
    let second_group = store.add_group(Group::new("Trip", vec![you.clone()]));
    let id = store.add_expense(group_expense(first_group, you.id, 40.0));

    let patch = ExpensePatch {
        group_id: Some(Some(second_group)),
        ..ExpensePatch::default()
    };
    store.update_expense(id, patch).unwrap();
    assert_close(store.group(first_group).unwrap().total_expenses, 0.0);
    assert_close(store.group(second_group).unwrap().total_expenses, 40.0);
}

#[test]
fn transfer_round_trip_restores_balances() {
    let mut store = ExpenseStore::with_sample_data();
    let spending_before = store.wallet_of_kind(WalletKind::Spending).unwrap().amount;
    let savings_before = store.wallet_of_kind(WalletKind::Savings).unwrap().amount;

    store.transfer_to_savings(180.0).unwrap();
    store.use_savings(180.0).unwrap();

    assert_close(
        store.wallet_of_kind(WalletKind::Spending).unwrap().amount,
        spending_before,
    );
    assert_close(
        store.wallet_of_kind(WalletKind::Savings).unwrap().amount,
        savings_before,
    );
}

#[test]
fn transfer_preserves_the_sum_of_balances() {
    let mut store = ExpenseStore::with_sample_data();
    let sum_before = store.wallet_of_kind(WalletKind::Spending).unwrap().amount
        + store.wallet_of_kind(WalletKind::Savings).unwrap().amount;

    store.transfer_to_savings(333.33).unwrap();

    let sum_after = store.wallet_of_kind(WalletKind::Spending).unwrap().amount
        + store.wallet_of_kind(WalletKind::Savings).unwrap().amount;
    assert_close(sum_after, sum_before);
}

#[test]
fn over_balance_transfer_fails_and_changes_nothing() {
    let mut store = ExpenseStore::with_sample_data();
    let spending_before = store.wallet_of_kind(WalletKind::Spending).unwrap().amount;
    let savings_before = store.wallet_of_kind(WalletKind::Savings).unwrap().amount;

    let err = store
        .transfer_to_savings(spending_before + 1.0)
        .expect_err("transfer past the balance must fail");
    assert!(matches!(err, StoreError::InsufficientFunds { .. }));

    assert_close(
        store.wallet_of_kind(WalletKind::Spending).unwrap().amount,
        spending_before,
    );
    assert_close(
        store.wallet_of_kind(WalletKind::Savings).unwrap().amount,
        savings_before,
    );
}

#[test]
fn transfers_without_wallets_report_the_missing_kind() {
    let mut store = ExpenseStore::new(User::new("You", "you@example.com"));
    let err = store
        .transfer_to_savings(10.0)
        .expect_err("no wallets seeded");
    assert!(matches!(err, StoreError::WalletMissing(_)));
}

#[test]
fn overspending_floors_the_spending_wallet_at_zero() {
    let mut store = ExpenseStore::with_sample_data();
    let balance = store.wallet_of_kind(WalletKind::Spending).unwrap().amount;

    store.add_expense(Expense::new(
        "Laptop",
        balance + 500.0,
        Category::Shopping,
        date(2025, 4, 10),
    ));

    assert_close(store.wallet_of_kind(WalletKind::Spending).unwrap().amount, 0.0);
}

#[test]
fn adding_an_expense_debits_the_spending_wallet() {
    let mut store = ExpenseStore::with_sample_data();
    let before = store.wallet_of_kind(WalletKind::Spending).unwrap().amount;

    store.add_expense(Expense::new(
        "Takeout",
        24.0,
        Category::Food,
        date(2025, 4, 10),
    ));

    assert_close(
        store.wallet_of_kind(WalletKind::Spending).unwrap().amount,
        before - 24.0,
    );
}

#[test]
fn total_spent_sums_all_amounts_and_is_zero_when_empty() {
    let empty = ExpenseStore::new(User::new("You", "you@example.com"));
    assert_close(empty.expense_summary(date(2025, 4, 15)).total_spent, 0.0);

    let store = ExpenseStore::with_sample_data();
    let expected: f64 = store.expenses().iter().map(|expense| expense.amount).sum();
    assert_close(store.expense_summary(date(2025, 4, 15)).total_spent, expected);
}

#[test]
fn deleting_a_group_cascades_to_its_expenses() {
    let (mut store, group_id) = store_with_group();
    let payer = store.current_user().id;
    store.add_expense(group_expense(group_id, payer, 60.0));
    store.add_expense(group_expense(group_id, payer, 30.0));
    store.add_expense(Expense::new(
        "Solo",
        15.0,
        Category::Food,
        date(2025, 4, 5),
    ));

    store.delete_group(group_id).unwrap();

    assert!(store.group(group_id).is_none());
    assert!(store.group_expenses(group_id).is_empty());
    assert!(store
        .expenses()
        .iter()
        .all(|expense| expense.group_id != Some(group_id)));
    assert_eq!(store.expenses().len(), 1);
}

#[test]
fn monthly_summary_matches_the_reference_scenario() {
    let mut store = ExpenseStore::new(User::new("You", "you@example.com"));
    store.add_expense(
        Expense::new("Groceries", 78.50, Category::Food, date(2025, 4, 1))
            .with_description("Weekly grocery shopping"),
    );
    store.add_expense(Expense::new("Rent", 950.00, Category::Housing, date(2025, 4, 1)));

    let summary = store.expense_summary(date(2025, 4, 15));
    assert_close(summary.this_month, 1028.50);
    assert_close(*summary.by_category.get(&Category::Food).unwrap(), 78.50);
    assert_close(*summary.by_category.get(&Category::Housing).unwrap(), 950.00);
}

#[test]
fn deleting_the_only_group_expense_zeroes_the_accumulator() {
    let mut store = ExpenseStore::with_sample_data();
    let work_team = store
        .groups()
        .iter()
        .find(|group| group.name == "Work Team")
        .unwrap();
    let group_id = work_team.id;
    assert_close(work_team.total_expenses, 132.75);

    let lunch_id = store.group_expenses(group_id)[0].id;
    store.delete_expense(lunch_id).unwrap();

    assert_close(store.group(group_id).unwrap().total_expenses, 0.0);
}

#[test]
fn delete_reports_unknown_expenses() {
    let mut store = ExpenseStore::with_sample_data();
    let err = store
        .delete_expense(uuid::Uuid::new_v4())
        .expect_err("unknown id must be reported");
    assert!(matches!(err, StoreError::ExpenseNotFound(_)));
}
