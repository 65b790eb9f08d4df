//! Item database source for `itemsel`.
//!
//! The database is line-delimited JSON, one item per line:
//!
//! ```text
//! {"ItemID": 4151, "Name": "Abyssal whip", "Icon": "https://example.invalid/4151.gif"}
//! {"id": 11802, "name": "Armadyl godsword"}
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use frizbee::{Config, match_list};
use itemsel_source_api::{Item, ItemId, ItemSource, SourceError};
use thiserror::Error;
use tracing::debug;

/// Default cap on the number of items a single search returns.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Errors raised while loading an item database.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read item database {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid item on line {line}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory item database answering searches with fuzzy label matching.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: BTreeMap<ItemId, Item>,
    limit: usize,
}

impl Catalog {
    /// Build a catalog from items; a later item replaces an earlier one with
    /// the same id.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Parse a line-delimited JSON item database. Blank lines are skipped.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, CatalogError> {
        let mut items = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CatalogError::Io {
                path: PathBuf::from("<reader>"),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let item = serde_json::from_str::<Item>(trimmed).map_err(|source| {
                CatalogError::Parse {
                    line: index + 1,
                    source,
                }
            })?;
            items.push(item);
        }
        Ok(Self::new(items))
    }

    /// Load the item database stored at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            CatalogError::Io { source, .. } => CatalogError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), items = catalog.len(), "loaded item database");
        Ok(catalog)
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn fuzzy_matches(&self, needle: &str, skip: Option<ItemId>) -> Vec<Item> {
        let (ids, haystacks): (Vec<ItemId>, Vec<&str>) = self
            .items
            .values()
            .filter(|item| Some(item.id) != skip)
            .map(|item| (item.id, item.label.as_str()))
            .unzip();

        let mut ranked: Vec<(u16, ItemId)> = match_list(needle, &haystacks, &match_config())
            .into_iter()
            .filter(|entry| entry.score > 0)
            .map(|entry| (entry.score, ids[entry.index as usize]))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        ranked
            .into_iter()
            .filter_map(|(_, id)| self.items.get(&id).cloned())
            .collect()
    }
}

/// Typo tolerance stays off so that a query only matches labels containing
/// all of its characters in order.
fn match_config() -> Config {
    Config {
        prefilter: true,
        max_typos: Some(0),
        sort: false,
        ..Config::default()
    }
}

impl ItemSource for Catalog {
    fn search_items(&self, query: &str) -> Result<Vec<Item>, SourceError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Ok(self.items.values().take(self.limit).cloned().collect());
        }

        let exact = ItemId::parse_canonical(needle).and_then(|id| self.items.get(&id));
        let mut results: Vec<Item> = exact.cloned().into_iter().collect();
        results.extend(self.fuzzy_matches(needle, exact.map(|item| item.id)));
        results.truncate(self.limit);

        debug!(query = needle, matches = results.len(), "catalog search");
        Ok(results)
    }

    fn resolve_item(&self, id: ItemId) -> Result<Item, SourceError> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(SourceError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    const DATABASE: &str = r#"{"ItemID": 4151, "Name": "Abyssal whip", "Icon": "whip.gif"}
{"ItemID": 1333, "Name": "Rune scimitar"}

{"ItemID": 4587, "Name": "Dragon scimitar"}
{"id": 11802, "name": "Armadyl godsword"}
"#;

    fn catalog() -> Catalog {
        Catalog::from_reader(Cursor::new(DATABASE)).expect("parse database")
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|item| item.id.get()).collect()
    }

    #[test]
    fn empty_query_lists_items_in_id_order() {
        let results = catalog().search_items("").unwrap();
        assert_eq!(ids(&results), vec![1333, 4151, 4587, 11802]);
    }

    #[test]
    fn empty_query_respects_limit() {
        let results = catalog().with_limit(2).search_items("   ").unwrap();
        assert_eq!(ids(&results), vec![1333, 4151]);
    }

    #[test]
    fn label_search_matches_in_order_characters() {
        let results = catalog().search_items("scimitar").unwrap();
        let found = ids(&results);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&1333));
        assert!(found.contains(&4587));
    }

    #[test]
    fn unmatched_query_returns_empty_list() {
        assert!(catalog().search_items("zzzz").unwrap().is_empty());
    }

    #[test]
    fn exact_id_query_lists_that_item_first() {
        let results = catalog().search_items("4151").unwrap();
        assert_eq!(results.first().map(|item| item.label.as_str()), Some("Abyssal whip"));
        assert_eq!(results.first().and_then(|item| item.icon.as_deref()), Some("whip.gif"));
    }

    #[test]
    fn resolve_known_and_unknown_ids() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve_item(ItemId::new(11802)).unwrap().label,
            "Armadyl godsword"
        );
        assert_eq!(
            catalog.resolve_item(ItemId::new(99)),
            Err(SourceError::NotFound { id: ItemId::new(99) })
        );
    }

    #[test]
    fn later_duplicates_replace_earlier_items() {
        let catalog = Catalog::new([Item::new(1, "old"), Item::new(1, "new")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve_item(ItemId::new(1)).unwrap().label, "new");
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = Catalog::from_reader(Cursor::new("{\"id\": 1, \"name\": \"ok\"}\nnot json\n"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn open_reads_database_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATABASE.as_bytes()).unwrap();
        let catalog = Catalog::open(file.path()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn open_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("itemdb.ljson");
        let err = Catalog::open(&missing).unwrap_err();
        match err {
            CatalogError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
