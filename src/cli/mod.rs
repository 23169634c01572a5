//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage and query layers. Values
//! that clap hands over as strings (statuses, amounts) are parsed here so
//! that bad input surfaces as a `TrackerError` kind.

pub mod audit;
pub mod expense;
pub mod task;

pub use audit::handle_audit_command;
pub use expense::{handle_expense_command, BudgetCommands, ExpenseCommands};
pub use task::{handle_task_command, TaskCommands};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, MonthPeriod, TaskStatus};

pub(crate) fn parse_status(s: &str) -> TrackerResult<TaskStatus> {
    s.parse()
}

pub(crate) fn parse_amount(s: &str) -> TrackerResult<Money> {
    Money::parse(s).map_err(|e| {
        TrackerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '12.50' or '12'. Error: {}",
            s, e
        ))
    })
}

/// Month filter from `--month`/`--year`; `--year` alone is not a filter
pub(crate) fn resolve_period(
    month: Option<u32>,
    year: Option<i32>,
) -> TrackerResult<Option<MonthPeriod>> {
    match (month, year) {
        (Some(month), year) => MonthPeriod::for_month(month, year).map(Some),
        (None, Some(_)) => Err(TrackerError::Usage("--year requires --month".into())),
        (None, None) => Ok(None),
    }
}

/// A buffered writer for `--output`, or stdout
pub(crate) fn open_output(path: Option<&Path>) -> TrackerResult<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_status_kind() {
        assert!(matches!(
            parse_status("finished"),
            Err(TrackerError::InvalidStatus(_))
        ));
        assert_eq!(parse_status("DONE").unwrap(), TaskStatus::Done);
    }

    #[test]
    fn test_resolve_period() {
        assert_eq!(resolve_period(None, None).unwrap(), None);
        assert_eq!(
            resolve_period(Some(3), Some(2026)).unwrap(),
            Some(MonthPeriod::new(2026, 3).unwrap())
        );
        assert!(resolve_period(Some(0), Some(2026)).unwrap_err().is_validation());
        assert!(matches!(
            resolve_period(None, Some(2026)),
            Err(TrackerError::Usage(_))
        ));
    }
}
