//! Audit log CLI command

use crate::error::TrackerResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> TrackerResult<()> {
    let logger = storage.audit_log();
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries in {}", logger.path().display());
        if !storage.audit_enabled() {
            println!(
                "Auditing is off; set \"audit_enabled\": true in {} to turn it on.",
                storage.paths().settings_file().display()
            );
        }
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
