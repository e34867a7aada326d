use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A balance bucket. Exactly one wallet of each kind exists per store; the
/// seed creates both and no operation creates more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wallet {
    pub id: Uuid,
    pub kind: WalletKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_expenses: Option<f64>,
}

impl Wallet {
    pub fn spending(amount: f64, monthly_limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: WalletKind::Spending,
            amount,
            monthly_limit: Some(monthly_limit),
            savings_goal: None,
            fixed_expenses: None,
        }
    }

    pub fn savings(amount: f64, savings_goal: f64, fixed_expenses: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: WalletKind::Savings,
            amount,
            monthly_limit: None,
            savings_goal: Some(savings_goal),
            fixed_expenses: Some(fixed_expenses),
        }
    }
}

impl Identifiable for Wallet {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Wallet {
    fn display_label(&self) -> String {
        format!("{} wallet", self.kind)
    }
}

/// The two supported wallet classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Spending,
    Savings,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WalletKind::Spending => "spending",
            WalletKind::Savings => "savings",
        };
        f.write_str(label)
    }
}

/// Field-level merge applied by `update_wallet`. Limits and goals are
/// clearable; the balance is not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_expenses: Option<Option<f64>>,
}

impl WalletPatch {
    pub fn apply_to(&self, wallet: &mut Wallet) {
        if let Some(amount) = self.amount {
            wallet.amount = amount;
        }
        if let Some(monthly_limit) = self.monthly_limit {
            wallet.monthly_limit = monthly_limit;
        }
        if let Some(savings_goal) = self.savings_goal {
            wallet.savings_goal = savings_goal;
        }
        if let Some(fixed_expenses) = self.fixed_expenses {
            wallet.fixed_expenses = fixed_expenses;
        }
    }
}
