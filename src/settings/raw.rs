use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use itemsel::ui::UiConfig;
use itemsel::{ItemId, app_dirs, logging};
use itemsel_source_catalog::DEFAULT_SEARCH_LIMIT;
use serde::Deserialize;

use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

pub(super) const DEFAULT_CATALOG_FILE: &str = "itemdb.ljson";
pub(super) const DEFAULT_REF_ID: &str = "A";
pub(super) const DEFAULT_LOG_FILE: &str = "itemsel.log";

/// Configuration as read from files and the environment, before defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    pub(super) source: SourceSection,
    pub(super) query: QuerySection,
    pub(super) ui: UiSection,
    pub(super) log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SourceSection {
    pub(super) catalog: Option<PathBuf>,
    pub(super) search_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct QuerySection {
    pub(super) file: Option<PathBuf>,
    pub(super) ref_id: Option<String>,
    pub(super) item_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
    pub(super) title: Option<String>,
    pub(super) placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LogSection {
    pub(super) filter: Option<String>,
    pub(super) file: Option<PathBuf>,
}

impl RawConfig {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(catalog) = &cli.catalog {
            self.source.catalog = Some(catalog.clone());
        }
        if let Some(file) = &cli.query_file {
            self.query.file = Some(file.clone());
        }
        if let Some(id) = cli.item_id {
            self.query.item_id = Some(id);
        }
        if let Some(title) = &cli.title {
            self.ui.title = Some(title.clone());
        }
    }

    /// Fill defaults and validate.
    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let search_limit = self.source.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        ensure!(
            search_limit > 0,
            "source.search_limit must be greater than zero"
        );

        let catalog = match self.source.catalog {
            Some(path) => path,
            None => app_dirs::get_data_dir()
                .context("no catalog configured and the data directory is unknown")?
                .join(DEFAULT_CATALOG_FILE),
        };
        let log_file = match self.log.file {
            Some(path) => path,
            None => app_dirs::get_cache_dir()
                .context("no log file configured and the cache directory is unknown")?
                .join(DEFAULT_LOG_FILE),
        };

        let defaults = UiConfig::default();
        Ok(ResolvedConfig {
            catalog,
            search_limit,
            query_file: self.query.file,
            ref_id: self.query.ref_id.unwrap_or_else(|| DEFAULT_REF_ID.to_string()),
            item_id: self.query.item_id.map(ItemId::new),
            ui: UiConfig {
                title: self.ui.title.unwrap_or(defaults.title),
                placeholder: self.ui.placeholder.unwrap_or(defaults.placeholder),
            },
            log_filter: self
                .log
                .filter
                .unwrap_or_else(|| logging::DEFAULT_FILTER.to_string()),
            log_file,
        })
    }
}
