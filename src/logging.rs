//! Diagnostics go to a log file: the terminal belongs to the UI.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

/// Where log output should go, or `None` when logging is off.
pub fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    if !settings.enabled {
        return None;
    }
    settings.file.clone().or_else(default_log_path)
}

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence over
/// `settings.level`.
pub fn init(settings: &LogSettings) -> Result<Option<PathBuf>, std::io::Error> {
    let Some(path) = log_path(settings) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(Some(path))
}
