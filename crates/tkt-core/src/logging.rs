//! Log setup.
//!
//! Logs go to a daily-rolling file under `${TKT_HOME}/logs`, never to the
//! terminal (the TUI owns it). The `TKT_LOG` env var takes env-filter
//! directives; the default level is `info`.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Installs the global tracing subscriber.
///
/// Returns a guard that must be held for the lifetime of the process;
/// dropping it flushes and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "tkt.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("TKT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
