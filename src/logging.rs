//! Log setup for the terminal UI.
//!
//! The UI owns the terminal, so events go to a log file instead of stderr.
//! `ITEMSEL_LOG` takes precedence over the configured filter.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_FILTER_ENV: &str = "ITEMSEL_LOG";
pub const DEFAULT_FILTER: &str = "itemsel=info,warn";

/// Install the global subscriber, appending to `file`.
pub fn initialize(filter: &str, file: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(filter))
        .with_context(|| format!("invalid log filter '{filter}'"))?;

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("failed to open log file {}", file.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(Mutex::new(writer)),
        )
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
