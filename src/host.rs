//! Query host used by the `itemsel` binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itemsel_source_api::{Query, QueryHost};
use tracing::{info, warn};

/// Persists committed queries to an optional JSON file and counts run
/// requests.
#[derive(Debug, Default)]
pub struct FileQueryHost {
    path: Option<PathBuf>,
    changes: usize,
    runs: usize,
    last_error: Option<String>,
}

impl FileQueryHost {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Number of `on_change` notifications received.
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Number of run requests received.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// The most recent failure to persist the query, if any.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    fn persist(&self, query: &Query) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(query)?;
        fs::write(path, json + "\n")
            .with_context(|| format!("failed to write query to {}", path.display()))
    }
}

impl QueryHost for FileQueryHost {
    fn on_change(&mut self, updated: &Query) {
        self.changes += 1;
        if let Err(err) = self.persist(updated) {
            let message = format!("{err:#}");
            warn!(error = %message, "query not persisted");
            self.last_error = Some(message);
        }
    }

    fn on_run_query(&mut self) {
        self.runs += 1;
        info!(runs = self.runs, "query run requested");
    }
}

/// Read a query file, or start from an empty query when it does not exist.
pub fn load_query(path: &Path, ref_id: &str) -> Result<Query> {
    if !path.exists() {
        return Ok(Query::new(ref_id));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read query from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse query in {}", path.display()))
}
