//! Expense queries: category and month filters, totals, budget checks

use std::collections::BTreeMap;

use crate::error::TrackerResult;
use crate::models::{Expense, Money, MonthPeriod};
use crate::storage::Store;

/// Expenses in `category` (case-insensitive), in stored order
pub fn list_by_category<'a>(
    store: &'a Store<Expense>,
    category: &'a str,
) -> impl Iterator<Item = &'a Expense> + Clone + 'a {
    store.iter().filter(move |e| e.in_category(category))
}

/// Expenses created during `period`, in stored order
pub fn list_by_month(
    store: &Store<Expense>,
    period: MonthPeriod,
) -> impl Iterator<Item = &Expense> + Clone + '_ {
    store.iter().filter(move |e| period.contains(&e.created_at))
}

/// Sum of every amount; zero for an empty store
pub fn summary_total(store: &Store<Expense>) -> Money {
    store.iter().map(|e| e.amount).sum()
}

/// Sum of amounts created during `period`
pub fn total_for_period(store: &Store<Expense>, period: MonthPeriod) -> Money {
    list_by_month(store, period).map(|e| e.amount).sum()
}

/// Sum of amounts for a month; `year` defaults to the current one
pub fn summary_by_month(
    store: &Store<Expense>,
    month: u32,
    year: Option<i32>,
) -> TrackerResult<Money> {
    let period = MonthPeriod::for_month(month, year)?;
    Ok(total_for_period(store, period))
}

/// Totals per category, sorted by category name
///
/// Takes any selection of expenses, so a month filter can be applied first.
/// Categories that differ only in case are merged under the first spelling
/// seen.
pub fn category_totals<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Vec<(String, Money)> {
    let mut totals: BTreeMap<String, (String, Money)> = BTreeMap::new();
    for expense in expenses {
        let entry = totals
            .entry(expense.category.to_lowercase())
            .or_insert_with(|| (expense.category.clone(), Money::zero()));
        entry.1 += expense.amount;
    }
    totals.into_values().collect()
}

/// Outcome of comparing a month's spending against a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCheck {
    pub period: MonthPeriod,
    pub spent: Money,
    pub budget: Money,
}

impl BudgetCheck {
    /// Spending strictly above the budget
    pub fn exceeded(&self) -> bool {
        self.spent > self.budget
    }

    /// How far over budget; zero when within it
    pub fn overage(&self) -> Money {
        if self.exceeded() {
            self.spent - self.budget
        } else {
            Money::zero()
        }
    }

    /// How much is left; zero when over budget
    pub fn remaining(&self) -> Money {
        if self.exceeded() {
            Money::zero()
        } else {
            self.budget - self.spent
        }
    }
}

/// Compare a month's spending against a caller-supplied budget
pub fn budget_check(store: &Store<Expense>, period: MonthPeriod, budget: Money) -> BudgetCheck {
    BudgetCheck {
        period,
        spent: total_for_period(store, period),
        budget,
    }
}
