//! Log file setup.
//!
//! Stdout belongs to the TUI, so events go to a daily-rotated file under
//! `$FOLIO_HOME/logs`. Verbosity comes from `FOLIO_LOG` (an `EnvFilter`
//! directive, default `info`). Failing to set up logging never stops the app.

use std::fs;

use folio_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FOLIO_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber.
///
/// The returned guard flushes buffered events when dropped; keep it alive
/// for the whole run. `None` means logging is disabled.
pub fn init() -> Option<WorkerGuard> {
    let dir = paths::logs_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("folio")
        .filename_suffix("log")
        .build(&dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVE),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}
