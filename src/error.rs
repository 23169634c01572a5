//! Error types for the tracker
//!
//! Every failure in the store and query layers surfaces as a distinct
//! `TrackerError` kind. The command-line front end is the only place that
//! turns a kind into a message and an exit code.

use std::path::Path;

use thiserror::Error;

/// The main error type for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A backing file already exists and re-initialization was not requested
    #[error("Store already initialized at {path} (use --force to reinitialize)")]
    AlreadyInitialized { path: String },

    /// No backing file exists yet
    #[error("No store found at {path} (run init first)")]
    NotInitialized { path: String },

    /// The backing file is not a well-formed store
    #[error("Corrupt store at {path}: {reason}")]
    CorruptStore { path: String, reason: String },

    /// Entity lookup miss
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Status value outside the known set
    #[error("Invalid status '{0}' (expected one of: todo, in-progress, done)")]
    InvalidStatus(String),

    /// Writing the backing file failed
    #[error("Failed to persist {path}: {reason}")]
    PersistFailed { path: String, reason: String },

    /// Malformed command input
    #[error("Usage error: {0}")]
    Usage(String),

    /// Validation errors for record fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TrackerError {
    /// Create a "not found" error for tasks
    pub fn task_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Task",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.to_string(),
        }
    }

    /// Create a corrupt-store error for the given file
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::CorruptStore {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a persist-failed error for the given file
    pub fn persist_failed(path: &Path, reason: impl Into<String>) -> Self {
        Self::PersistFailed {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the backing file was rejected as malformed
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptStore { .. })
    }

    /// Process exit code for this error kind
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Validation(_) | Self::InvalidStatus(_) => 2,
            Self::NotFound { .. } => 3,
            Self::AlreadyInitialized { .. } | Self::NotInitialized { .. } => 4,
            Self::CorruptStore { .. } => 5,
            Self::PersistFailed { .. } => 6,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Export(_) => 1,
        }
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::task_not_found(7);
        assert_eq!(err.to_string(), "Task not found: 7");
        assert!(err.is_not_found());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_invalid_status_error() {
        let err = TrackerError::InvalidStatus("later".into());
        assert!(err.to_string().contains("'later'"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_corrupt_store_error() {
        let err = TrackerError::corrupt(Path::new("/tmp/tasks.json"), "bad shape");
        assert_eq!(err.to_string(), "Corrupt store at /tmp/tasks.json: bad shape");
        assert!(err.is_corrupt());
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
