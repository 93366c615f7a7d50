//! File logging. The popup owns the terminal, so nothing is written to
//! stderr while it is open.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Log file name inside the data directory
pub const LOG_FILE: &str = "keydo.log";

/// Route `tracing` output to `<dir>/keydo.log`.
///
/// The returned guard flushes pending lines on drop and must be held for the
/// life of the program. Returns None when the log file cannot be opened or
/// a subscriber is already installed; the popup still runs, unlogged.
pub fn init(dir: &Path) -> Option<WorkerGuard> {
    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("warning: could not open log in {}: {}", dir.display(), e);
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(guard)
}
