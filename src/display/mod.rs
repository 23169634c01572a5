//! Display formatting for terminal output
//!
//! Fixed-format rows for listings, plus summary and budget views.

pub mod expense;
pub mod task;

pub use expense::{
    format_budget_check, format_budget_warning, format_category_totals, format_expense_list,
    format_expense_row, format_summary,
};
pub use task::{format_status_counts, format_task_details, format_task_list, format_task_row};
