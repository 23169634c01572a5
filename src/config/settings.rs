//! User settings
//!
//! Stored as `config.json` in the data directory. Every field has a serde
//! default, so a partial or missing file still loads.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::file_io::write_json_atomic;

/// User settings for the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of this file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Timestamp format for list output (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category given to expenses added without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Whether mutations are written to the audit log (off unless set)
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_audit_enabled() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_category: default_category(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written; `save` is called by `init`.
    pub fn load_or_default(paths: &TrackerPaths) -> TrackerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> TrackerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_category, "general");
        assert!(!settings.audit_enabled);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(Settings::load_or_default(&paths).unwrap(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "€".into(),
            audit_enabled: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        assert_eq!(Settings::load_or_default(&paths).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_category": "misc"}"#).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.default_category, "misc");
        assert_eq!(loaded.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{").unwrap();

        let err = Settings::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }
}
