//! Audit log for store mutations
//!
//! Every add, update, status change and delete that reaches disk is recorded
//! as one JSON line in an append-only log, with the record before and after
//! the change.
//!
//! - `AuditEntry`: one logged operation.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: one-line summary of the fields an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
