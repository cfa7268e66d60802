//! Tracing subscriber setup.
//!
//! The terminal is owned by the UI, so log lines go to `logging.file` only.
//! Without a file no subscriber is installed and events are discarded.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Build the filter: `RUST_LOG` when set, otherwise `settings.level`.
fn build_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns `Ok(false)` when logging is disabled.
pub fn init(settings: &LoggingSettings) -> io::Result<bool> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    Ok(installed)
}
