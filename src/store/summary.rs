//! Derived aggregate types computed from current store contents.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;

/// Overall spending totals for a reference date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseSummary {
    pub total_spent: f64,
    pub this_month: f64,
    pub this_week: f64,
    pub by_category: BTreeMap<Category, f64>,
}

/// What the current user owes and is owed within one group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupBalanceSummary {
    pub group_id: Uuid,
    pub group_name: String,
    pub total: f64,
    pub you_owe: f64,
    pub you_are_owed: f64,
}

/// Per-member settlement position within one group.
///
/// `net` is positive when the member fronted more than their share and is
/// owed money back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberBalance {
    pub user_id: Uuid,
    pub user_name: String,
    pub paid: f64,
    pub owed: f64,
    pub net: f64,
}

/// One category's slice of total spending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    /// Fraction of total spending in `0.0..=1.0`; zero when nothing is spent.
    pub share: f64,
}

/// Total spent in one calendar month; `month` is the first day of the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub month: NaiveDate,
    pub total: f64,
}

/// Total spent on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Filter applied by the expense list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpenseScope {
    #[default]
    All,
    Personal,
    Group,
}
