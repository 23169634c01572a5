//! Record store: the durable collection of records
//!
//! [`Store`] is the snapshot value (also the on-disk envelope); [`RecordStore`]
//! is a short-lived session that owns the backing path and applies
//! mutations. Each mutation is computed on a copy of the snapshot, written
//! out in full, and only then swapped in, so a failed write leaves both the
//! file and the in-memory snapshot as they were.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, Money, Patch, Record, RecordId, Task, TaskPatch, TaskStatus};

use super::file_io::{read_json_required, write_json_atomic};

/// An ordered collection of records, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store<R> {
    records: Vec<R>,
}

impl<R> Default for Store<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> Store<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, checking id and field invariants
    pub fn from_records(records: Vec<R>) -> TrackerResult<Self> {
        let store = Self { records };
        store.check_integrity().map_err(TrackerError::Validation)?;
        Ok(store)
    }

    /// All records in stored order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// The id the next added record will receive: `max(ids) + 1`, or 1
    ///
    /// Fails once the largest id in use is `u64::MAX`.
    pub fn next_id(&self) -> TrackerResult<RecordId> {
        match self.records.iter().map(Record::id).max() {
            None => Ok(RecordId::FIRST),
            Some(max) => max.next().ok_or_else(|| {
                TrackerError::Validation(format!("no {} id left after {}", R::ENTITY, max))
            }),
        }
    }

    fn get_mut(&mut self, id: RecordId) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    fn remove(&mut self, id: RecordId) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Ids must be positive and unique; every record must pass validation
    fn check_integrity(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            let id = record.id();
            if !id.is_valid() {
                return Err(format!("record id must be positive, found {}", id));
            }
            if !seen.insert(id) {
                return Err(format!("duplicate record id {}", id));
            }
            record
                .validate()
                .map_err(|e| format!("record {}: {}", id, e))?;
        }
        Ok(())
    }
}

impl<'a, R> IntoIterator for &'a Store<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A loaded store bound to its backing file
#[derive(Debug)]
pub struct RecordStore<R: Record> {
    path: PathBuf,
    store: Store<R>,
    audit: Option<AuditLogger>,
}

impl<R: Record> RecordStore<R> {
    /// Create the backing file holding an empty store
    ///
    /// Fails with `AlreadyInitialized` if the file exists and `force` is not
    /// set; the existing file is left untouched in that case.
    pub fn initialize(path: impl Into<PathBuf>, force: bool) -> TrackerResult<Self> {
        let path = path.into();

        if path.exists() && !force {
            return Err(TrackerError::AlreadyInitialized {
                path: path.display().to_string(),
            });
        }

        let session = Self {
            path,
            store: Store::new(),
            audit: None,
        };
        session.persist()?;
        log::info!("initialized {} store at {}", R::ENTITY, session.path.display());
        Ok(session)
    }

    /// Read the whole backing file into memory
    pub fn load(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let path = path.into();
        let store: Store<R> = read_json_required(&path)?;
        store
            .check_integrity()
            .map_err(|reason| TrackerError::corrupt(&path, reason))?;

        log::debug!(
            "loaded {} {} records from {}",
            store.len(),
            R::ENTITY,
            path.display()
        );

        Ok(Self {
            path,
            store,
            audit: None,
        })
    }

    /// Record every successful mutation in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot
    pub fn snapshot(&self) -> &Store<R> {
        &self.store
    }

    /// Look up a record, failing with `NotFound`
    pub fn get(&self, id: RecordId) -> TrackerResult<&R> {
        self.store.get(id).ok_or_else(|| not_found::<R>(id))
    }

    /// Append a new record built from the next id and the creation time
    pub fn add<F>(&mut self, build: F) -> TrackerResult<RecordId>
    where
        F: FnOnce(RecordId, DateTime<Utc>) -> R,
    {
        let id = self.store.next_id()?;
        let record = build(id, Utc::now());
        if record.id() != id {
            return Err(TrackerError::Validation(format!(
                "new record must use id {}, got {}",
                id,
                record.id()
            )));
        }
        record.validate()?;

        let mut next = self.store.clone();
        next.records.push(record.clone());
        self.commit(next)?;

        log::debug!("added {} {}", R::ENTITY, id);
        self.audit(AuditEntry::create(
            R::ENTITY,
            id.to_string(),
            Some(record.title().to_string()),
            &record,
        ));

        Ok(id)
    }

    /// Apply the supplied fields of `patch` to a record
    ///
    /// An empty patch is a no-op: nothing changes, `updated_at` included, and
    /// nothing is written.
    pub fn update<P: Patch<R>>(&mut self, id: RecordId, patch: P) -> TrackerResult<&R> {
        if !self.store.contains(id) {
            return Err(not_found::<R>(id));
        }
        if patch.is_empty() {
            return self.get(id);
        }

        let mut next = self.store.clone();
        let record = next.get_mut(id).ok_or_else(|| not_found::<R>(id))?;
        let before = record.clone();
        patch.apply(record);
        record.validate()?;
        record.touch(Utc::now());
        let after = record.clone();

        self.commit(next)?;

        log::debug!("updated {} {}", R::ENTITY, id);
        self.audit(AuditEntry::update(
            R::ENTITY,
            id.to_string(),
            Some(after.title().to_string()),
            &before,
            &after,
        ));

        self.get(id)
    }

    /// Remove a record; remaining ids are not renumbered
    pub fn delete(&mut self, id: RecordId) -> TrackerResult<R> {
        let mut next = self.store.clone();
        let removed = next.remove(id).ok_or_else(|| not_found::<R>(id))?;

        self.commit(next)?;

        log::debug!("deleted {} {}", R::ENTITY, id);
        self.audit(AuditEntry::delete(
            R::ENTITY,
            id.to_string(),
            Some(removed.title().to_string()),
            &removed,
        ));

        Ok(removed)
    }

    /// Write the whole snapshot to the backing file (temp file + rename)
    pub fn persist(&self) -> TrackerResult<()> {
        write_json_atomic(&self.path, &self.store)?;
        log::debug!(
            "persisted {} {} records to {}",
            self.store.len(),
            R::ENTITY,
            self.path.display()
        );
        Ok(())
    }

    fn commit(&mut self, next: Store<R>) -> TrackerResult<()> {
        write_json_atomic(&self.path, &next)?;
        self.store = next;
        Ok(())
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            // Audit failures never roll back a committed mutation
            if let Err(e) = logger.log(&entry) {
                log::warn!("failed to write audit entry: {}", e);
            }
        }
    }
}

impl RecordStore<Task> {
    /// Add a task with an optional description and status
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> TrackerResult<RecordId> {
        let title = title.into();
        self.add(|id, now| {
            Task::new(id, title.trim(), now)
                .with_description(description)
                .with_status(status.unwrap_or_default())
        })
    }

    /// Set a task's status; any status may follow any other
    pub fn set_status(&mut self, id: RecordId, status: TaskStatus) -> TrackerResult<&Task> {
        self.update(id, TaskPatch::new().status(status))
    }
}

impl RecordStore<Expense> {
    /// Add an expense
    pub fn add_expense(
        &mut self,
        title: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        description: Option<String>,
    ) -> TrackerResult<RecordId> {
        let title = title.into();
        let category = category.into();
        self.add(|id, now| {
            Expense::new(id, title.trim(), category.trim(), amount, now)
                .with_description(description)
        })
    }
}

fn not_found<R: Record>(id: RecordId) -> TrackerError {
    TrackerError::NotFound {
        entity_type: R::ENTITY.as_str(),
        identifier: id.to_string(),
    }
}
