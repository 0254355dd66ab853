//! Log file setup.
//!
//! The terminal is owned by the editor, so logs go to a file only:
//! `<cache dir>/pad/pad.log`. `RUST_LOG` overrides the default `info` filter.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "pad.log";

/// Directory the log file is written to.
pub fn log_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pad")
}

/// Install the global subscriber. Keep the returned guard alive until exit so buffered lines
/// are flushed.
pub fn init() -> Result<WorkerGuard> {
    let directory = log_directory();
    std::fs::create_dir_all(&directory).with_context(|| {
        format!("Failed to create log directory: {}", directory.display())
    })?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&directory, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(path = %directory.join(LOG_FILE_NAME).display(), "logging initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_app_specific() {
        assert!(log_directory().ends_with("pad"));
    }
}
