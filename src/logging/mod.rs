//! Logging setup.
//!
//! While the terminal is in raw mode nothing may be printed behind the view's
//! back, so events go to an in-memory [`LogBuffer`] (shown by the `logs`
//! built-in) and, optionally, to a plain-text log file.
pub mod buffer;
pub mod collector;
mod entry;

pub use buffer::LogBuffer;
pub use collector::LogCollector;
pub use entry::LogEntry;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "AGENT_TERM_LOG";

const MAX_LOG_ENTRIES: usize = 10_000;

/// Installs the global subscriber and returns the buffer it feeds.
pub fn init(default_filter: &str, log_file: Option<&Path>) -> Result<Arc<LogBuffer>> {
    let buffer = Arc::new(LogBuffer::new(MAX_LOG_ENTRIES));

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(LogCollector::new(buffer.clone()))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(buffer)
}
