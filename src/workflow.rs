use std::sync::Arc;

use anyhow::{Context, Result};
use itemsel::host::{FileQueryHost, load_query};
use itemsel::ui::{self, EditorOutcome};
use itemsel::{Catalog, ItemSource, Query};
use tracing::{info, warn};

use crate::settings::ResolvedConfig;

/// Coordinates loading the catalog and query and running the picker.
pub(crate) struct EditorWorkflow {
    source: Arc<dyn ItemSource>,
    query: Query,
    host: FileQueryHost,
    ui: ui::UiConfig,
}

impl EditorWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let ResolvedConfig {
            catalog,
            search_limit,
            query_file,
            ref_id,
            item_id,
            ui,
            ..
        } = config;

        let catalog = Catalog::open(&catalog)
            .with_context(|| format!("failed to load item catalog {}", catalog.display()))?
            .with_limit(search_limit);
        info!(items = catalog.len(), "item catalog loaded");

        let mut query = match &query_file {
            Some(path) => load_query(path, &ref_id)?,
            None => Query::new(ref_id),
        };
        if item_id.is_some() {
            query.item_id = item_id;
        }

        Ok(Self {
            source: Arc::new(catalog),
            query,
            host: FileQueryHost::new(query_file),
            ui,
        })
    }

    pub(crate) fn run(self) -> Result<EditorOutcome> {
        let (outcome, mut host) = ui::run(self.source, self.query, self.host, self.ui)?;
        info!(
            changes = host.changes(),
            runs = host.runs(),
            "editor closed"
        );
        if let Some(err) = host.take_error() {
            warn!(error = %err, "last query write failed");
            eprintln!("warning: {err}");
        }
        Ok(outcome)
    }
}
