//! Read-only queries over a loaded store snapshot
//!
//! Nothing here mutates or touches the filesystem.

pub mod expenses;
pub mod tasks;

pub use expenses::{
    budget_check, category_totals, list_by_category, list_by_month, summary_by_month,
    summary_total, total_for_period, BudgetCheck,
};
pub use tasks::{list_by_status, status_counts, StatusCounts, StatusFilter};
