use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::domain::{category::Category, expense::Expense, user::User};
use expense_core::store::ExpenseStore;

fn build_sample_store(expense_count: usize) -> ExpenseStore {
    let mut store = ExpenseStore::new(User::new("You", "you@example.com"));
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..expense_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let category = Category::ALL[idx % Category::ALL.len()];
        let amount = 5.0 + (idx % 200) as f64;
        store.add_expense(Expense::new(
            format!("Expense {idx}"),
            amount,
            category,
            date,
        ));
    }
    store
}

fn bench_derived_views(c: &mut Criterion) {
    let store = build_sample_store(black_box(10_000));
    let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("expense_summary_10k", |b| {
        b.iter(|| {
            let summary = store.expense_summary(reference);
            black_box(summary);
        })
    });

    c.bench_function("category_breakdown_10k", |b| {
        b.iter(|| {
            let breakdown = store.category_breakdown();
            black_box(breakdown);
        })
    });

    c.bench_function("monthly_totals_10k", |b| {
        b.iter(|| {
            let trend = store.monthly_totals(reference, 6);
            black_box(trend);
        })
    });

    c.bench_function("recent_expenses_10k", |b| {
        b.iter(|| {
            let recent = store.recent_expenses(5);
            black_box(recent.len());
        })
    });
}

criterion_group!(benches, bench_derived_views);
criterion_main!(benches);
