//! File I/O utilities with atomic writes
//!
//! Reads map malformed content to `CorruptStore`; writes go to a sibling temp
//! file that is synced and renamed over the target, so a crash mid-write
//! leaves the previous file intact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> TrackerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    parse_file(path)
}

/// Read JSON from a file, failing with `NotInitialized` if it doesn't exist
pub fn read_json_required<T, P>(path: P) -> TrackerResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrackerError::NotInitialized {
            path: path.display().to_string(),
        });
    }

    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> TrackerResult<T> {
    let file = File::open(path)
        .map_err(|e| TrackerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TrackerError::corrupt(path, e.to_string()))
}

/// Sibling temp path used while writing `path`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// Any failure is reported as `PersistFailed` and leaves the target untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> TrackerResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::persist_failed(
                path,
                format!("failed to create directory {}: {}", parent.display(), e),
            )
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = write_temp(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| format!("failed to rename temp file: {}", e))
    });

    result.map_err(|reason| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::persist_failed(path, reason)
    })
}

fn write_temp<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), String> {
    let file = File::create(temp_path).map_err(|e| format!("failed to create temp file: {}", e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| format!("failed to serialize data: {}", e))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| format!("failed to flush data: {}", e))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| format!("failed to sync data: {}", e))
}
