//! File-backed tracing setup.
//!
//! The TUI owns stdout/stderr, so logs always go to
//! `${LIVEPAGE_HOME}/logs/livepage.log` through a non-blocking writer.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// File name of the log inside the logs directory.
pub const LOG_FILE_NAME: &str = "livepage.log";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. The returned guard flushes the
/// writer on drop and must be held until the process exits. If a subscriber
/// is already installed the new one is discarded.
///
/// # Errors
/// Returns an error if the log directory or file cannot be created.
pub fn init(log_dir: &Path, default_filter: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let path = log_dir.join(LOG_FILE_NAME);
    let file = opts
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(guard)
}
