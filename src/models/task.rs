//! Task model
//!
//! A task carries a title, optional description and a status. Status may move
//! between any two values; there is no enforced workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecordId;
use super::record::{Patch, Record};
use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
}

impl TaskStatus {
    /// Every status, in lifecycle order
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// The on-disk spelling of this status
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width specifiers work in list output
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(TrackerError::InvalidStatus(s.to_string())),
        }
    }
}

/// A tracked task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier
    pub id: RecordId,

    /// Short title
    pub title: String,

    /// Optional detail text
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified (None until the first update)
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with the default status
    pub fn new(id: RecordId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            created_at,
            updated_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Check if the task is finished
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

impl Record for Task {
    const ENTITY: EntityType = EntityType::Task;

    fn id(&self) -> RecordId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn validate(&self) -> TrackerResult<()> {
        if self.title.trim().is_empty() {
            return Err(TrackerError::Validation("Task title cannot be empty".into()));
        }
        Ok(())
    }
}

/// Partial update for a task
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into().trim().to_string());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Patch<Task> for TaskPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}
