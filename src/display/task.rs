//! Task display formatting
//!
//! One fixed-format line per task, plus a detail view.

use crate::models::Task;
use crate::query::{StatusCounts, StatusFilter};

/// Format a single task as a list row: `[1] todo         Buy groceries`
pub fn format_task_row(task: &Task) -> String {
    format!("[{}] {:<12} {}", task.id, task.status, task.title)
}

/// Format a task listing, one row per task
pub fn format_task_list<'a>(tasks: impl IntoIterator<Item = &'a Task>, filter: StatusFilter) -> String {
    let rows: Vec<String> = tasks.into_iter().map(format_task_row).collect();

    if rows.is_empty() {
        return match filter {
            StatusFilter::All => "No tasks found.".to_string(),
            StatusFilter::Only(status) => format!("No tasks with status '{}'.", status),
        };
    }

    rows.join("\n")
}

/// Format task details for display
pub fn format_task_details(task: &Task, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Task:        {}\n", task.id));
    output.push_str(&format!("Title:       {}\n", task.title));

    if let Some(description) = &task.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output.push_str(&format!("Status:      {}\n", task.status));
    output.push_str(&format!(
        "Created:     {}\n",
        task.created_at.with_timezone(&chrono::Local).format(date_format)
    ));

    if let Some(updated_at) = task.updated_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            updated_at.with_timezone(&chrono::Local).format(date_format)
        ));
    }

    output
}

/// Format the per-status footer, e.g. `3 tasks (1 todo, 1 in-progress, 1 done)`
pub fn format_status_counts(counts: &StatusCounts) -> String {
    let noun = if counts.total() == 1 { "task" } else { "tasks" };
    format!(
        "{} {} ({} todo, {} in-progress, {} done)",
        counts.total(),
        noun,
        counts.todo,
        counts.in_progress,
        counts.done
    )
}
