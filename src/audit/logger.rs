//! Append-only audit log writer
//!
//! The log is line-delimited JSON: one complete `AuditEntry` per line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};

use super::entry::AuditEntry;

/// Writes audit entries to, and reads them back from, a JSONL file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush
    pub fn log(&self, entry: &AuditEntry) -> TrackerResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackerError::Io(format!("Failed to create audit directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| TrackerError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TrackerError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                TrackerError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                TrackerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = AuditEntry::create(EntityType::Task, "1", None, &json!({"id": 1}));

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Task);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 1..=10 {
            let entry = AuditEntry::create(EntityType::Task, i.to_string(), None, &json!({"id": i}));
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["8", "9", "10"]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("nested").join("audit.log"));
        let entry = AuditEntry::delete(EntityType::Expense, "2", None, &json!({}));

        logger.log(&entry).unwrap();
        assert!(logger.path().exists());
    }

    #[test]
    fn test_corrupt_line_reported() {
        let (logger, _temp) = create_test_logger();
        std::fs::write(logger.path(), "not json\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
