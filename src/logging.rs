//! Tracing setup.
//!
//! The terminal is owned by the UI, so logs only ever go to a file:
//!   linkshelf --log-file /tmp/linkshelf.log
//!   RUST_LOG=linkshelf=debug linkshelf --log-file ...

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a file-backed subscriber. Without a file nothing is installed and
/// every `tracing` call is a no-op.
pub fn init_tracing(log_file: Option<&Path>, debug: bool) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
