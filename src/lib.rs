//! tracker - local task and expense tracker
//!
//! Records live in one JSON file per kind (`tasks.json`, `expenses.json`).
//! A command loads the whole file, applies at most one mutation, and writes
//! the file back through a temp file and rename, so a failed write never
//! leaves a half-written store behind.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Error kinds and exit codes
//! - `models`: Tasks, expenses, money, months and budgets
//! - `storage`: Atomic JSON file storage and the record store
//! - `query`: Read-only filters and totals over a loaded store
//! - `audit`: Append-only audit log of mutations
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `tracker` binary
//! - `logging`: stderr diagnostics via `flexi_logger`
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker::config::{Settings, TrackerPaths};
//! use tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new(None)?;
//! let settings = Settings::load_or_default(&paths)?;
//! let storage = Storage::new(paths, &settings);
//!
//! let mut tasks = storage.tasks()?;
//! let id = tasks.add_task("Buy groceries", None, None)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod query;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
