//! Logging - tracing Subscriber Setup
//!
//! Human-readable output on stderr plus a daily rolling file without ANSI
//! colors. The filter comes from `LODGING_ADMIN_LOG`, defaulting to `info`
//! (`debug` in development builds).

use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::constants::{LOG_ENV, LOG_FILE_PREFIX};
use crate::error::{Error, Result};
use crate::helpers::is_development;

fn default_level() -> Level {
    if is_development() { Level::DEBUG } else { Level::INFO }
}

/// Build the filter from `LODGING_ADMIN_LOG`, falling back to the default level
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level().into())
        .with_env_var(LOG_ENV)
        .from_env_lossy()
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        env_filter()
    };

    let stderr_layer = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_writer(file_writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Invalid {
            message: format!("Logging already initialized: {e}"),
        })?;

    Ok(guard)
}
