//! Task CLI commands
//!
//! The top-level `init`, `add`, `update`, `mark`, `show`, `delete`, `list`
//! and `export` commands all act on the task store.

use std::path::PathBuf;

use clap::Subcommand;

use super::{open_output, parse_status};
use crate::config::Settings;
use crate::display::{format_status_counts, format_task_details, format_task_list};
use crate::error::{TrackerError, TrackerResult};
use crate::export::export_tasks_csv;
use crate::models::{RecordId, TaskPatch};
use crate::query::{list_by_status, status_counts, StatusFilter};
use crate::storage::Storage;

/// Task commands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create the task store (and default settings)
    Init {
        /// Replace an existing store with an empty one
        #[arg(short, long)]
        force: bool,
    },
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Initial status (todo, in-progress, done)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change a task's title or description
    Update {
        /// Task ID
        id: RecordId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
    },
    /// Set a task's status
    Mark {
        /// Task ID
        id: RecordId,
        /// New status (todo, in-progress, done)
        status: String,
    },
    /// Show a task's details
    Show {
        /// Task ID
        id: RecordId,
    },
    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: RecordId,
    },
    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Status to show, or "all"
        #[arg(default_value = "all")]
        status: String,
        /// Print per-status counts after the list
        #[arg(long)]
        counts: bool,
    },
    /// Export tasks to CSV
    Export {
        /// Only export tasks with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a task command
pub fn handle_task_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TaskCommands,
) -> TrackerResult<()> {
    match cmd {
        TaskCommands::Init { force } => {
            let tasks = storage.init_tasks(force)?;
            settings.save(storage.paths())?;
            println!("Initialized task store at {}", tasks.path().display());
        }

        TaskCommands::Add {
            title,
            description,
            status,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let mut tasks = storage.tasks()?;
            let id = tasks.add_task(title, description, status)?;
            println!("Task added successfully (ID: {})", id);
        }

        TaskCommands::Update {
            id,
            title,
            description,
            clear_description,
        } => {
            let mut patch = TaskPatch::new();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            if let Some(description) = description {
                patch = patch.description(Some(description));
            } else if clear_description {
                patch = patch.description(None);
            }

            if patch == TaskPatch::new() {
                return Err(TrackerError::Usage(
                    "No changes specified. Use --title, --description or --clear-description."
                        .into(),
                ));
            }

            let mut tasks = storage.tasks()?;
            let task = tasks.update(id, patch)?;
            println!("Task updated successfully (ID: {})", task.id);
        }

        TaskCommands::Mark { id, status } => {
            let status = parse_status(&status)?;
            let mut tasks = storage.tasks()?;
            let task = tasks.set_status(id, status)?;
            println!("Task {} marked as {}", task.id, task.status);
        }

        TaskCommands::Show { id } => {
            let tasks = storage.tasks()?;
            print!("{}", format_task_details(tasks.get(id)?, &settings.date_format));
        }

        TaskCommands::Delete { id } => {
            let mut tasks = storage.tasks()?;
            let removed = tasks.delete(id)?;
            println!("Task deleted successfully (ID: {})", removed.id);
        }

        TaskCommands::List { status, counts } => {
            let filter: StatusFilter = status.parse()?;
            let tasks = storage.tasks()?;
            let snapshot = tasks.snapshot();

            println!("{}", format_task_list(list_by_status(snapshot, filter), filter));
            if counts {
                println!("{}", format_status_counts(&status_counts(snapshot)));
            }
        }

        TaskCommands::Export { status, output } => {
            let filter = match status {
                Some(status) => status.parse()?,
                None => StatusFilter::All,
            };
            let tasks = storage.tasks()?;

            let writer = open_output(output.as_deref())?;
            let rows = export_tasks_csv(list_by_status(tasks.snapshot(), filter), writer)?;

            if let Some(path) = output {
                println!("Exported {} tasks to {}", rows, path.display());
            }
        }
    }

    Ok(())
}
