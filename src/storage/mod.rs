//! Storage layer
//!
//! JSON file storage with atomic writes. Each record kind lives in its own
//! file; `Storage` opens them with the configured audit log attached.

pub mod budgets;
pub mod file_io;
pub mod store;

pub use budgets::BudgetBook;
pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use store::{RecordStore, Store};

use crate::audit::AuditLogger;
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::models::{Expense, Record, Task};

/// Opens the stores that live under one data directory
pub struct Storage {
    paths: TrackerPaths,
    audit: Option<AuditLogger>,
}

impl Storage {
    pub fn new(paths: TrackerPaths, settings: &Settings) -> Self {
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));
        Self { paths, audit }
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Whether mutations are being written to the audit log
    pub fn audit_enabled(&self) -> bool {
        self.audit.is_some()
    }

    /// The audit log, whether or not auditing is enabled
    pub fn audit_log(&self) -> AuditLogger {
        AuditLogger::new(self.paths.audit_log())
    }

    /// Create the task store file
    pub fn init_tasks(&self, force: bool) -> TrackerResult<RecordStore<Task>> {
        self.attach(RecordStore::initialize(self.paths.tasks_file(), force)?)
    }

    /// Create the expense store file
    pub fn init_expenses(&self, force: bool) -> TrackerResult<RecordStore<Expense>> {
        self.attach(RecordStore::initialize(self.paths.expenses_file(), force)?)
    }

    /// Load the task store
    pub fn tasks(&self) -> TrackerResult<RecordStore<Task>> {
        self.attach(RecordStore::load(self.paths.tasks_file())?)
    }

    /// Load the expense store
    pub fn expenses(&self) -> TrackerResult<RecordStore<Expense>> {
        self.attach(RecordStore::load(self.paths.expenses_file())?)
    }

    /// Load the budget book (empty if none has been saved)
    pub fn budgets(&self) -> TrackerResult<BudgetBook> {
        let book = BudgetBook::load(self.paths.budgets_file())?;
        Ok(match &self.audit {
            Some(logger) => book.with_audit(logger.clone()),
            None => book,
        })
    }

    fn attach<R: Record>(&self, store: RecordStore<R>) -> TrackerResult<RecordStore<R>> {
        Ok(match &self.audit {
            Some(logger) => store.with_audit(logger.clone()),
            None => store,
        })
    }
}
