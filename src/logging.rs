//! File logging via `tracing`.
//!
//! The terminal belongs to the TUI, so log lines go to a file through a
//! non-blocking `tracing-appender` writer. `RUST_LOG` overrides the configured
//! level.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_dir};

/// Directory the log file is written to.
pub fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings
        .directory
        .clone()
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered lines are flushed on exit.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let dir = log_dir(settings);
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, &settings.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(env_filter(&settings.level))
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(guard)
}
