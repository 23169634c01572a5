//! Diagnostic logging bootstrap
//!
//! Library code logs through the `log` facade. The binary starts a
//! `flexi_logger` backend writing to stderr, so stdout stays reserved for
//! command output (CSV exports in particular).

use flexi_logger::{Logger, LoggerHandle};

/// Environment variable holding the log level (e.g. `debug` or `tracker=trace`)
pub const LOG_ENV: &str = "TRACKER_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Pick the log spec: `--verbose` wins, then `TRACKER_LOG`, then `warn`
pub fn resolve_level(verbose: bool, from_env: Option<&str>) -> String {
    if verbose {
        return VERBOSE_LEVEL.to_string();
    }
    match from_env.map(str::trim) {
        Some(spec) if !spec.is_empty() => spec.to_string(),
        _ => DEFAULT_LEVEL.to_string(),
    }
}

/// Start stderr logging
///
/// The returned handle must be kept alive for the life of the process.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle, String> {
    let from_env = std::env::var(LOG_ENV).ok();
    let spec = resolve_level(verbose, from_env.as_deref());

    Logger::try_with_str(&spec)
        .map_err(|err| format!("invalid log level `{spec}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}
