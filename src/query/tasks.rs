//! Task queries

use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;
use crate::models::{Task, TaskStatus};
use crate::storage::Store;

/// Which tasks a listing should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = TrackerError;

    /// "all" or any task status
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

/// Tasks matching `filter`, in stored order
///
/// The iterator is lazy and can be cloned to walk the snapshot again.
pub fn list_by_status(
    store: &Store<Task>,
    filter: StatusFilter,
) -> impl Iterator<Item = &Task> + Clone + '_ {
    store.iter().filter(move |task| filter.matches(task))
}

/// Number of tasks in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}

pub fn status_counts(store: &Store<Task>) -> StatusCounts {
    store
        .iter()
        .fold(StatusCounts::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
            counts
        })
}
