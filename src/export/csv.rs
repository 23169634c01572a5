//! CSV Export functionality
//!
//! Writes tasks and expenses to any writer, one row per record after a
//! header row. Callers filter through the query layer first.

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::error::TrackerResult;
use crate::models::{Expense, Task};

pub const TASK_HEADER: [&str; 6] = [
    "id",
    "title",
    "description",
    "status",
    "created_at",
    "updated_at",
];

pub const EXPENSE_HEADER: [&str; 7] = [
    "id",
    "title",
    "description",
    "category",
    "amount",
    "created_at",
    "updated_at",
];

/// Export tasks to CSV, returning the number of rows written
pub fn export_tasks_csv<'a, W, I>(tasks: I, writer: W) -> TrackerResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Task>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TASK_HEADER)?;

    let mut rows = 0;
    for task in tasks {
        let id = task.id.to_string();
        let created_at = timestamp(&task.created_at);
        let updated_at = task.updated_at.as_ref().map(timestamp).unwrap_or_default();
        csv_writer.write_record([
            id.as_str(),
            task.title.as_str(),
            task.description.as_deref().unwrap_or(""),
            task.status.as_str(),
            created_at.as_str(),
            updated_at.as_str(),
        ])?;
        rows += 1;
    }

    csv_writer.flush()?;
    Ok(rows)
}

/// Export expenses to CSV, returning the number of rows written
pub fn export_expenses_csv<'a, W, I>(expenses: I, writer: W) -> TrackerResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Expense>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPENSE_HEADER)?;

    let mut rows = 0;
    for expense in expenses {
        let id = expense.id.to_string();
        let amount = expense.amount.format_plain();
        let created_at = timestamp(&expense.created_at);
        let updated_at = expense
            .updated_at
            .as_ref()
            .map(timestamp)
            .unwrap_or_default();
        csv_writer.write_record([
            id.as_str(),
            expense.title.as_str(),
            expense.description.as_deref().unwrap_or(""),
            expense.category.as_str(),
            amount.as_str(),
            created_at.as_str(),
            updated_at.as_str(),
        ])?;
        rows += 1;
    }

    csv_writer.flush()?;
    Ok(rows)
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordId, TaskStatus};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_export_tasks() {
        let tasks = vec![
            Task::new(RecordId::new(1), "Buy groceries", at()),
            Task::new(RecordId::new(2), "Call, then email", at())
                .with_description(Some("about \"rent\"".into()))
                .with_status(TaskStatus::InProgress),
        ];

        let mut output = Vec::new();
        let rows = export_tasks_csv(&tasks, &mut output).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,title,description,status,created_at,updated_at");
        assert_eq!(lines[1], "1,Buy groceries,,todo,2026-03-04T09:30:00+00:00,");
        assert!(lines[2].starts_with("2,\"Call, then email\",\"about \"\"rent\"\"\",in-progress,"));
    }

    #[test]
    fn test_export_expenses_amount_two_decimals() {
        let expenses = vec![Expense::new(
            RecordId::new(3),
            "Lunch",
            "food",
            Money::from_cents(1250),
            at(),
        )];

        let mut output = Vec::new();
        export_expenses_csv(&expenses, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "id,title,description,category,amount,created_at,updated_at"
        );
        assert_eq!(lines[1], "3,Lunch,,food,12.50,2026-03-04T09:30:00+00:00,");
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let mut output = Vec::new();
        let rows = export_tasks_csv(std::iter::empty(), &mut output).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }
}
