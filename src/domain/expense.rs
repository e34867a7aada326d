use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::common::*;

/// A single dated spending record, optionally shared among group members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ExpenseMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category,
            date,
            description: None,
            is_group: false,
            group_id: None,
            paid_by: None,
            members: Vec::new(),
            receipt_image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the expense as shared within `group_id`, paid for by `paid_by`.
    pub fn shared(mut self, group_id: Uuid, paid_by: Uuid, members: Vec<ExpenseMember>) -> Self {
        self.is_group = true;
        self.group_id = Some(group_id);
        self.paid_by = Some(paid_by);
        self.members = members;
        self
    }

    /// The group accumulator contribution: `(group_id, amount)` for linked
    /// group expenses, `None` otherwise.
    pub fn group_link(&self) -> Option<(Uuid, f64)> {
        if self.is_group {
            self.group_id.map(|group_id| (group_id, self.amount))
        } else {
            None
        }
    }

    /// This expense's share entry for `user_id`, if any.
    pub fn member_share(&self, user_id: Uuid) -> Option<&ExpenseMember> {
        self.members.iter().find(|member| member.user_id == user_id)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({})", self.title, self.category)
    }
}

/// One participant's share of a group expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseMember {
    pub user_id: Uuid,
    pub user_name: String,
    pub amount: f64,
    pub paid: bool,
}

impl ExpenseMember {
    pub fn new(user: &crate::domain::user::User, amount: f64, paid: bool) -> Self {
        Self {
            user_id: user.id,
            user_name: user.name.clone(),
            amount,
            paid,
        }
    }
}

/// Field-level merge applied by `update_expense`. `None` leaves a field
/// untouched; the nested `Option` on clearable fields distinguishes "set to
/// nothing" from "keep".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Option<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<Option<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ExpenseMember>>,
}

impl ExpensePatch {
    pub fn apply_to(&self, expense: &mut Expense) {
        if let Some(title) = &self.title {
            expense.title = title.clone();
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(is_group) = self.is_group {
            expense.is_group = is_group;
        }
        if let Some(group_id) = self.group_id {
            expense.group_id = group_id;
        }
        if let Some(paid_by) = self.paid_by {
            expense.paid_by = paid_by;
        }
        if let Some(members) = &self.members {
            expense.members = members.clone();
        }
    }

    pub fn has_effect(&self) -> bool {
        self.title.is_some()
            || self.amount.is_some()
            || self.category.is_some()
            || self.date.is_some()
            || self.description.is_some()
            || self.is_group.is_some()
            || self.group_id.is_some()
            || self.paid_by.is_some()
            || self.members.is_some()
    }
}
