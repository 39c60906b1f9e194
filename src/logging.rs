//! Tracing setup for the binary. The prompt owns the terminal, so events go
//! to a log file instead of stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "SEARCH_PROMPT_LOG";
pub const LOG_FILE: &str = "search-prompt.log";

/// Install the global subscriber writing to `<dir>/search-prompt.log`.
///
/// Returns the appender guard; dropping it flushes pending events. Returns
/// `None` (and logs nothing) when the directory cannot be created or a
/// subscriber is already installed.
pub fn init(dir: &Path) -> Option<WorkerGuard> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        eprintln!("logging disabled: cannot create {}: {err}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init()
        .ok()
        .map(|()| guard)
}
