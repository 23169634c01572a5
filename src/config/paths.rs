//! Path management
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory (the `--data-dir` flag)
//! 2. `TRACKER_DATA_DIR` environment variable
//! 3. The platform config directory (`~/.config/tracker-cli` on Linux,
//!    `~/Library/Application Support/tracker-cli` on macOS,
//!    `%APPDATA%\tracker-cli\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{TrackerError, TrackerResult};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "TRACKER_DATA_DIR";

/// All paths used by the tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Resolve the data directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the platform home
    /// directory cannot be determined.
    pub fn new(explicit: Option<PathBuf>) -> TrackerResult<Self> {
        let base_dir = match explicit {
            Some(dir) => dir,
            None => match std::env::var_os(DATA_DIR_ENV) {
                Some(custom) if !custom.is_empty() => PathBuf::from(custom),
                _ => resolve_default_path()?,
            },
        };

        Ok(Self { base_dir })
    }

    /// Use a fixed base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// config.json
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// tasks.json
    pub fn tasks_file(&self) -> PathBuf {
        self.base_dir.join("tasks.json")
    }

    /// expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.base_dir.join("expenses.json")
    }

    /// budgets.json (monthly budgets)
    pub fn budgets_file(&self) -> PathBuf {
        self.base_dir.join("budgets.json")
    }

    /// audit.log (JSONL)
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> TrackerResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            TrackerError::Io(format!(
                "Failed to create data directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}

fn resolve_default_path() -> TrackerResult<PathBuf> {
    ProjectDirs::from("", "", "tracker-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            TrackerError::Config(format!(
                "Could not determine a home directory; set {} or pass --data-dir",
                DATA_DIR_ENV
            ))
        })
}
