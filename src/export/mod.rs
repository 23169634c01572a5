//! Export of tasks and expenses
//!
//! CSV only, for spreadsheets and other tools.

pub mod csv;

pub use csv::{export_expenses_csv, export_tasks_csv, EXPENSE_HEADER, TASK_HEADER};
