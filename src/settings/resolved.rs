use std::path::PathBuf;

use itemsel::ItemId;
use itemsel::ui::UiConfig;

/// Application-ready configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub catalog: PathBuf,
    pub search_limit: usize,
    pub query_file: Option<PathBuf>,
    pub ref_id: String,
    /// Replaces the id stored in the query file when set.
    pub item_id: Option<ItemId>,
    pub ui: UiConfig,
    pub log_filter: String,
    pub log_file: PathBuf,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Catalog: {}", self.catalog.display());
        println!("  Search limit: {}", self.search_limit);
        match &self.query_file {
            Some(path) => println!("  Query file: {}", path.display()),
            None => println!("  Query file: (in memory)"),
        }
        println!("  Query ref id: {}", self.ref_id);
        if let Some(id) = self.item_id {
            println!("  Item id override: {id}");
        }
        println!("  Prompt title: {}", self.ui.title);
        println!("  Placeholder: {}", self.ui.placeholder);
        println!("  Log filter: {}", self.log_filter);
        println!("  Log file: {}", self.log_file.display());
    }
}
