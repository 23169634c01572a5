//! Core data models for the tracker
//!
//! Tasks and expenses are the two record kinds; both are stored in the same
//! `{"records": [...]}` envelope.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod record;
pub mod task;

pub use budget::MonthlyBudget;
pub use expense::{Expense, ExpensePatch};
pub use ids::RecordId;
pub use money::{Money, MoneyParseError};
pub use period::MonthPeriod;
pub use record::{Patch, Record};
pub use task::{Task, TaskPatch, TaskStatus};
