use chrono::NaiveDate;
use expense_core::core::services::{
    ExpenseService, GroupService, ServiceError, SummaryService, WalletService,
};
use expense_core::domain::{
    category::Category,
    expense::{Expense, ExpenseMember, ExpensePatch},
    group::Group,
    user::User,
    wallet::WalletKind,
};
use expense_core::errors::StoreError;
use expense_core::store::ExpenseStore;
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn prepared_store() -> (ExpenseStore, Uuid) {
    let you = User::new("You", "you@example.com");
    let ann = User::new("Ann", "ann@example.com");
    let mut store = ExpenseStore::new(you.clone());
    let group_id =
        GroupService::add(&mut store, Group::new("Flatmates", vec![you, ann])).unwrap();
    (store, group_id)
}

#[test]
fn services_cover_a_full_expense_lifecycle() {
    let (mut store, group_id) = prepared_store();
    let members: Vec<ExpenseMember> = store
        .group(group_id)
        .unwrap()
        .members
        .iter()
        .map(|member| ExpenseMember::new(member, 45.0, member.id == store.current_user().id))
        .collect();
    let payer = store.current_user().id;

    let expense = Expense::new("Internet", 90.0, Category::Utilities, date(2025, 4, 6))
        .shared(group_id, payer, members);
    let id = ExpenseService::add(&mut store, expense).unwrap();

    let patch = ExpensePatch {
        title: Some("Internet & phone".into()),
        ..ExpensePatch::default()
    };
    ExpenseService::update(&mut store, id, patch).unwrap();
    assert_eq!(store.expense(id).unwrap().title, "Internet & phone");

    let removed = ExpenseService::remove(&mut store, id).unwrap();
    assert_eq!(removed.id, id);
    assert!(ExpenseService::list(&store).is_empty());
}

#[test]
fn update_fails_for_missing_expense() {
    let (mut store, _) = prepared_store();
    let patch = ExpensePatch {
        amount: Some(12.0),
        ..ExpensePatch::default()
    };
    let err = ExpenseService::update(&mut store, Uuid::new_v4(), patch)
        .expect_err("update must fail for unknown id");
    assert!(matches!(
        err,
        ServiceError::Store(StoreError::ExpenseNotFound(_))
    ));
}

#[test]
fn empty_titles_are_rejected() {
    let (mut store, _) = prepared_store();
    let expense = Expense::new("   ", 12.0, Category::Food, date(2025, 4, 6));
    assert!(ExpenseService::add(&mut store, expense).is_err());
}

#[test]
fn group_flag_requires_a_group_id() {
    let (mut store, _) = prepared_store();
    let mut expense = Expense::new("Dinner", 30.0, Category::Food, date(2025, 4, 6));
    expense.is_group = true;
    let err = ExpenseService::add(&mut store, expense).expect_err("missing group id must fail");
    assert!(matches!(err, ServiceError::Invalid(_)));
}

#[test]
fn share_sums_are_validated_on_update_too() {
    let (mut store, group_id) = prepared_store();
    let payer = store.current_user().id;
    let members: Vec<ExpenseMember> = store
        .group(group_id)
        .unwrap()
        .members
        .iter()
        .map(|member| ExpenseMember::new(member, 45.0, member.id == payer))
        .collect();
    let expense = Expense::new("Internet", 90.0, Category::Utilities, date(2025, 4, 6))
        .shared(group_id, payer, members.clone());
    let id = ExpenseService::add(&mut store, expense).unwrap();

    let drifted: Vec<ExpenseMember> = members
        .iter()
        .cloned()
        .map(|mut member| {
            member.amount = 10.0;
            member
        })
        .collect();
    let patch = ExpensePatch {
        members: Some(drifted),
        ..ExpensePatch::default()
    };
    let err = ExpenseService::update(&mut store, id, patch)
        .expect_err("shares far from the amount must fail");
    assert!(matches!(err, ServiceError::Invalid(_)));
}

#[test]
fn group_deletion_cascades_through_the_service() {
    let (mut store, group_id) = prepared_store();
    let payer = store.current_user().id;
    let expense = Expense::new("Cleaning", 20.0, Category::Housing, date(2025, 4, 6)).shared(
        group_id,
        payer,
        Vec::new(),
    );
    ExpenseService::add(&mut store, expense).unwrap();

    GroupService::remove(&mut store, group_id).unwrap();
    assert!(store.group_expenses(group_id).is_empty());
    assert!(GroupService::list(&store).is_empty());
}

#[test]
fn wallet_transfers_validate_before_delegating() {
    let mut store = ExpenseStore::with_sample_data();
    assert!(matches!(
        WalletService::transfer_to_savings(&mut store, -5.0),
        Err(ServiceError::Invalid(_))
    ));
    assert!(matches!(
        WalletService::use_savings(&mut store, 1_000_000.0),
        Err(ServiceError::Store(StoreError::InsufficientFunds { .. }))
    ));
}

#[test]
fn wallet_figures_update_through_the_service() {
    let mut store = ExpenseStore::with_sample_data();
    WalletService::set_monthly_limit(&mut store, 1800.0).unwrap();
    WalletService::set_savings_goal(&mut store, 6000.0).unwrap();
    WalletService::set_fixed_expenses(&mut store, 750.0).unwrap();

    let spending = store.wallet_of_kind(WalletKind::Spending).unwrap();
    assert_eq!(spending.monthly_limit, Some(1800.0));
    let savings = store.wallet_of_kind(WalletKind::Savings).unwrap();
    assert_eq!(savings.savings_goal, Some(6000.0));
    assert_eq!(savings.fixed_expenses, Some(750.0));
}

#[test]
fn summary_service_guards_window_sizes() {
    let store = ExpenseStore::with_sample_data();
    assert!(SummaryService::monthly_totals(&store, date(2025, 4, 15), 0).is_err());
    assert!(SummaryService::daily_totals(&store, date(2025, 4, 15), 0, None).is_err());
}
