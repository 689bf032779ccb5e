use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::app::config;

/// Log directives are read from `PARLOR_LOG` first, then `RUST_LOG`.
const LOG_ENV: &str = "PARLOR_LOG";

pub fn log_path() -> Option<PathBuf> {
    config::config_dir().map(|mut path| {
        path.push("parlor.log");
        path
    })
}

/// Installs the global subscriber. The terminal belongs to the interface,
/// so log lines go to `parlor.log` in the config directory instead of
/// stdout or stderr.
pub fn init() -> Result<()> {
    let path = log_path().context("no home directory for the log file")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("parlor=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
