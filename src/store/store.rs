use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    category::Category,
    expense::{Expense, ExpensePatch},
    group::{Group, GroupPatch},
    user::User,
    wallet::{Wallet, WalletKind, WalletPatch},
};
use crate::errors::StoreError;

use super::summary::{
    CategoryShare, DailyTotal, ExpenseScope, ExpenseSummary, GroupBalanceSummary, MemberBalance,
    MonthlyTotal,
};

/// Sole owner of the expense, group, and wallet collections.
///
/// Mutators keep the incremental group accumulators consistent with the
/// expense collection; derived views are recomputed from the collections on
/// every read. Constructed once per session and handed to consumers, never
/// held in an ambient global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    groups: Vec<Group>,
    wallets: Vec<Wallet>,
    current_user: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseStore {
    /// Creates an empty store owned by `current_user`.
    pub fn new(current_user: User) -> Self {
        let now = Utc::now();
        Self {
            expenses: Vec::new(),
            groups: Vec::new(),
            wallets: Vec::new(),
            current_user,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn wallet(&self, id: Uuid) -> Option<&Wallet> {
        self.wallets.iter().find(|wallet| wallet.id == id)
    }

    /// The wallet of `kind`, if seeded.
    pub fn wallet_of_kind(&self, kind: WalletKind) -> Option<&Wallet> {
        self.wallets.iter().find(|wallet| wallet.kind == kind)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Installs pre-built collections wholesale, bypassing per-add side
    /// effects. Used by the seed, which ships already-consistent data.
    pub(crate) fn replace_collections(
        &mut self,
        expenses: Vec<Expense>,
        groups: Vec<Group>,
        wallets: Vec<Wallet>,
    ) {
        self.expenses = expenses;
        self.groups = groups;
        self.wallets = wallets;
        self.touch();
    }

    // --- expenses -------------------------------------------------------

    /// Appends `expense` and applies its side effects: linked group
    /// accumulators grow by the amount, and the spending wallet is debited.
    ///
    /// The debit floors at zero; overspending past the balance is reported
    /// through a warning rather than a negative balance or an error.
    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        if let Some((group_id, amount)) = expense.group_link() {
            self.credit_group_total(group_id, amount);
        }
        self.debit_spending(expense.amount);
        self.expenses.push(expense);
        self.touch();
        id
    }

    /// Merges `patch` into the matching expense and reconciles group
    /// accumulators when the patch moves the expense between groups or
    /// changes its amount. Wallet balances are never touched by updates.
    pub fn update_expense(&mut self, id: Uuid, patch: ExpensePatch) -> Result<(), StoreError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(StoreError::ExpenseNotFound(id))?;

        let before = self.expenses[index].group_link();
        patch.apply_to(&mut self.expenses[index]);
        let after = self.expenses[index].group_link();

        if before != after {
            if let Some((group_id, amount)) = before {
                self.credit_group_total(group_id, -amount);
            }
            if let Some((group_id, amount)) = after {
                self.credit_group_total(group_id, amount);
            }
        }
        self.touch();
        Ok(())
    }

    /// Removes and returns the expense, rolling its amount out of the linked
    /// group's accumulator.
    pub fn delete_expense(&mut self, id: Uuid) -> Result<Expense, StoreError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(StoreError::ExpenseNotFound(id))?;
        let expense = self.expenses.remove(index);
        if let Some((group_id, amount)) = expense.group_link() {
            self.credit_group_total(group_id, -amount);
        }
        self.touch();
        Ok(expense)
    }

    // --- groups ---------------------------------------------------------

    pub fn add_group(&mut self, group: Group) -> Uuid {
        let id = group.id;
        self.groups.push(group);
        self.touch();
        id
    }

    pub fn update_group(&mut self, id: Uuid, patch: GroupPatch) -> Result<(), StoreError> {
        let group = self
            .groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or(StoreError::GroupNotFound(id))?;
        patch.apply_to(group);
        self.touch();
        Ok(())
    }

    /// Removes the group and cascades: every expense linked to it is deleted
    /// as well. Irreversible.
    pub fn delete_group(&mut self, id: Uuid) -> Result<Group, StoreError> {
        let index = self
            .groups
            .iter()
            .position(|group| group.id == id)
            .ok_or(StoreError::GroupNotFound(id))?;
        let group = self.groups.remove(index);
        self.expenses.retain(|expense| expense.group_id != Some(id));
        self.touch();
        Ok(group)
    }

    // --- wallets --------------------------------------------------------

    pub fn update_wallet(&mut self, id: Uuid, patch: WalletPatch) -> Result<(), StoreError> {
        let wallet = self
            .wallets
            .iter_mut()
            .find(|wallet| wallet.id == id)
            .ok_or(StoreError::WalletNotFound(id))?;
        patch.apply_to(wallet);
        self.touch();
        Ok(())
    }

    /// Moves `amount` from the spending wallet into savings. The sum of the
    /// two balances is preserved; on failure both are left unchanged.
    pub fn transfer_to_savings(&mut self, amount: f64) -> Result<(), StoreError> {
        self.transfer_between(WalletKind::Spending, WalletKind::Savings, amount)
    }

    /// Moves `amount` from savings back into the spending wallet.
    pub fn use_savings(&mut self, amount: f64) -> Result<(), StoreError> {
        self.transfer_between(WalletKind::Savings, WalletKind::Spending, amount)
    }

    fn transfer_between(
        &mut self,
        from: WalletKind,
        to: WalletKind,
        amount: f64,
    ) -> Result<(), StoreError> {
        let from_index = self
            .wallet_index(from)
            .ok_or(StoreError::WalletMissing(from))?;
        let to_index = self.wallet_index(to).ok_or(StoreError::WalletMissing(to))?;

        let available = self.wallets[from_index].amount;
        if amount > available {
            return Err(StoreError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        self.wallets[from_index].amount -= amount;
        self.wallets[to_index].amount += amount;
        self.touch();
        Ok(())
    }

    fn wallet_index(&self, kind: WalletKind) -> Option<usize> {
        self.wallets.iter().position(|wallet| wallet.kind == kind)
    }

    fn debit_spending(&mut self, amount: f64) {
        let Some(wallet) = self
            .wallets
            .iter_mut()
            .find(|wallet| wallet.kind == WalletKind::Spending)
        else {
            return;
        };
        if amount > wallet.amount {
            tracing::warn!(
                requested = amount,
                available = wallet.amount,
                "expense exceeds spending balance, flooring at zero"
            );
            wallet.amount = 0.0;
        } else {
            wallet.amount -= amount;
        }
    }

    fn credit_group_total(&mut self, group_id: Uuid, delta: f64) {
        if let Some(group) = self.groups.iter_mut().find(|group| group.id == group_id) {
            group.total_expenses += delta;
        }
    }

    // --- derived views --------------------------------------------------

    /// Spending totals relative to `reference`: overall, calendar month,
    /// and the week starting on the most recent Sunday.
    pub fn expense_summary(&self, reference: NaiveDate) -> ExpenseSummary {
        let total_spent = self.expenses.iter().map(|expense| expense.amount).sum();

        let this_month = self
            .expenses
            .iter()
            .filter(|expense| {
                expense.date.month() == reference.month()
                    && expense.date.year() == reference.year()
            })
            .map(|expense| expense.amount)
            .sum();

        let week_start = start_of_week(reference);
        let this_week = self
            .expenses
            .iter()
            .filter(|expense| expense.date >= week_start)
            .map(|expense| expense.amount)
            .sum();

        ExpenseSummary {
            total_spent,
            this_month,
            this_week,
            by_category: self.expenses_by_category(),
        }
    }

    /// Amount spent per category, covering only categories with at least one
    /// expense.
    pub fn expenses_by_category(&self) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// Expenses linked to `group_id`, in store order.
    pub fn group_expenses(&self, group_id: Uuid) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| expense.group_id == Some(group_id))
            .collect()
    }

    /// Per-group owed/owing figures for the current user. Expenses carrying
    /// no member shares contribute zero to both sides.
    pub fn group_balance_summaries(&self) -> Vec<GroupBalanceSummary> {
        let me = self.current_user.id;
        self.groups
            .iter()
            .map(|group| {
                let mut you_owe = 0.0;
                let mut you_are_owed = 0.0;
                for expense in self.group_expenses(group.id) {
                    if expense.paid_by == Some(me) {
                        you_are_owed += expense
                            .members
                            .iter()
                            .filter(|member| member.user_id != me && !member.paid)
                            .map(|member| member.amount)
                            .sum::<f64>();
                    } else if let Some(share) = expense.member_share(me) {
                        if !share.paid {
                            you_owe += share.amount;
                        }
                    }
                }
                GroupBalanceSummary {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    total: group.total_expenses,
                    you_owe,
                    you_are_owed,
                }
            })
            .collect()
    }

    /// Settlement position of every member of `group_id`: what they fronted,
    /// what their shares add up to, and the resulting net.
    pub fn member_balances(&self, group_id: Uuid) -> Result<Vec<MemberBalance>, StoreError> {
        let group = self
            .group(group_id)
            .ok_or(StoreError::GroupNotFound(group_id))?;
        let expenses = self.group_expenses(group_id);
        Ok(group
            .members
            .iter()
            .map(|member| {
                let mut paid = 0.0;
                let mut owed = 0.0;
                for expense in &expenses {
                    if expense.paid_by == Some(member.id) {
                        paid += expense.amount;
                    }
                    if let Some(share) = expense.member_share(member.id) {
                        owed += share.amount;
                    }
                }
                MemberBalance {
                    user_id: member.id,
                    user_name: member.name.clone(),
                    paid,
                    owed,
                    net: paid - owed,
                }
            })
            .collect())
    }

    /// The `limit` most recent expenses, newest first.
    pub fn recent_expenses(&self, limit: usize) -> Vec<&Expense> {
        let mut recent: Vec<&Expense> = self.expenses.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }

    /// Expenses matching `scope` and an optional case-insensitive title or
    /// description search, newest first.
    pub fn filtered_expenses(&self, scope: ExpenseScope, query: Option<&str>) -> Vec<&Expense> {
        let needle = query.map(str::to_lowercase);
        let mut matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|expense| match scope {
                ExpenseScope::All => true,
                ExpenseScope::Personal => !expense.is_group,
                ExpenseScope::Group => expense.is_group,
            })
            .filter(|expense| {
                let Some(needle) = &needle else {
                    return true;
                };
                expense.title.to_lowercase().contains(needle)
                    || expense
                        .description
                        .as_deref()
                        .is_some_and(|text| text.to_lowercase().contains(needle))
            })
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }

    /// Per-category spending with each category's share of the total,
    /// largest first. Categories without spending are omitted.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let totals = self.expenses_by_category();
        let total_spent: f64 = totals.values().sum();
        let mut breakdown: Vec<CategoryShare> = totals
            .into_iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                share: if total_spent > 0.0 {
                    amount / total_spent
                } else {
                    0.0
                },
            })
            .collect();
        breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        breakdown
    }

    /// Totals for the trailing `months` calendar months ending with the
    /// reference month, oldest first and zero-filled.
    pub fn monthly_totals(&self, reference: NaiveDate, months: u32) -> Vec<MonthlyTotal> {
        (0..months)
            .rev()
            .map(|back| {
                let month = shift_month_start(reference, -(back as i32));
                let total = self
                    .expenses
                    .iter()
                    .filter(|expense| {
                        expense.date.year() == month.year()
                            && expense.date.month() == month.month()
                    })
                    .map(|expense| expense.amount)
                    .sum();
                MonthlyTotal { month, total }
            })
            .collect()
    }

    /// Per-day totals for the trailing `days` days ending at `reference`,
    /// oldest first and zero-filled, optionally restricted to one category.
    pub fn daily_totals(
        &self,
        reference: NaiveDate,
        days: u32,
        category: Option<Category>,
    ) -> Vec<DailyTotal> {
        (0..days)
            .rev()
            .map(|back| {
                let date = reference - Duration::days(back as i64);
                let total = self
                    .expenses
                    .iter()
                    .filter(|expense| expense.date == date)
                    .filter(|expense| category.map_or(true, |wanted| expense.category == wanted))
                    .map(|expense| expense.amount)
                    .sum();
                DailyTotal { date, total }
            })
            .collect()
    }
}

/// The most recent Sunday on or before `date` (day-of-week index 0).
fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// First day of the month `offset` months away from `date`'s month.
fn shift_month_start(date: NaiveDate, offset: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + offset;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap()
}
