//! Expense display formatting
//!
//! Formats expenses, summaries and budget checks for terminal output.

use crate::models::{Expense, Money, MonthPeriod};
use crate::query::BudgetCheck;

/// Format a single expense as a list row
///
/// `[1] 2026-03-04  food          $12.50  Lunch`
pub fn format_expense_row(expense: &Expense, symbol: &str) -> String {
    format!(
        "[{}] {}  {:<12} {:>10}  {}",
        expense.id,
        expense
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d"),
        truncate(&expense.category, 12),
        expense.amount.format_with_symbol(symbol),
        expense.title
    )
}

/// Format an expense listing, one row per expense
pub fn format_expense_list<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    symbol: &str,
) -> String {
    let rows: Vec<String> = expenses
        .into_iter()
        .map(|e| format_expense_row(e, symbol))
        .collect();

    if rows.is_empty() {
        return "No expenses found.".to_string();
    }

    rows.join("\n")
}

/// Format a total, labelled with the month when there is one
pub fn format_summary(total: Money, period: Option<MonthPeriod>, symbol: &str) -> String {
    match period {
        Some(period) => format!(
            "Total expenses for {}: {}",
            period.long_name(),
            total.format_with_symbol(symbol)
        ),
        None => format!("Total expenses: {}", total.format_with_symbol(symbol)),
    }
}

/// Format per-category totals as a small table
pub fn format_category_totals(totals: &[(String, Money)], symbol: &str) -> String {
    if totals.is_empty() {
        return "No expenses found.".to_string();
    }

    let name_width = totals
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Category",
        "Total",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}\n",
        "",
        "",
        name_width = name_width
    ));

    for (name, total) in totals {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}\n",
            name,
            total.format_with_symbol(symbol),
            name_width = name_width
        ));
    }

    let grand_total: Money = totals.iter().map(|(_, total)| total).sum();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}",
        "Total",
        grand_total.format_with_symbol(symbol),
        name_width = name_width
    ));

    output
}

/// Format the result of a budget check
pub fn format_budget_check(check: &BudgetCheck, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget for {}\n", check.period.long_name()));
    output.push_str(&format!(
        "  Budget:    {:>12}\n",
        check.budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:     {:>12}\n",
        check.spent.format_with_symbol(symbol)
    ));

    if check.exceeded() {
        output.push_str(&format!(
            "  Over by:   {:>12}",
            check.overage().format_with_symbol(symbol)
        ));
    } else {
        output.push_str(&format!(
            "  Remaining: {:>12}",
            check.remaining().format_with_symbol(symbol)
        ));
    }

    output
}

/// One-line warning printed after an add pushes a month over budget
pub fn format_budget_warning(check: &BudgetCheck, symbol: &str) -> String {
    format!(
        "Warning: {} budget of {} exceeded by {}",
        check.period.long_name(),
        check.budget.format_with_symbol(symbol),
        check.overage().format_with_symbol(symbol)
    )
}

/// Truncate to `max_len` characters, padding shorter strings
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn march() -> MonthPeriod {
        MonthPeriod::new(2026, 3).unwrap()
    }

    #[test]
    fn test_row_contains_fields() {
        let expense = Expense::new(
            RecordId::new(4),
            "Lunch",
            "food",
            Money::from_cents(1250),
            march().at_day(4).unwrap(),
        );
        let row = format_expense_row(&expense, "$");
        assert!(row.starts_with("[4] 2026-03-04  food"));
        assert!(row.ends_with("$12.50  Lunch"));
    }

    #[test]
    fn test_long_category_truncated() {
        assert_eq!(truncate("entertainment", 12), "entertain...");
        assert_eq!(truncate("food", 6), "food  ");
    }

    #[test]
    fn test_summary() {
        let total = Money::from_cents(81250);
        assert_eq!(format_summary(total, None, "$"), "Total expenses: $812.50");
        assert_eq!(
            format_summary(total, Some(march()), "€"),
            "Total expenses for March 2026: €812.50"
        );
    }

    #[test]
    fn test_category_totals_table() {
        let totals = vec![
            ("food".to_string(), Money::from_cents(2050)),
            ("rent".to_string(), Money::from_cents(80000)),
        ];
        let table = format_category_totals(&totals, "$");
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("food"));
        assert!(lines[4].ends_with("$820.50"));
    }

    #[test]
    fn test_budget_check_output() {
        let over = BudgetCheck {
            period: march(),
            spent: Money::from_cents(12000),
            budget: Money::from_cents(10000),
        };
        assert!(format_budget_check(&over, "$").contains("Over by:"));
        assert_eq!(
            format_budget_warning(&over, "$"),
            "Warning: March 2026 budget of $100.00 exceeded by $20.00"
        );

        let under = BudgetCheck {
            spent: Money::from_cents(5000),
            ..over
        };
        assert!(format_budget_check(&under, "$").contains("Remaining:"));
    }
}
