use crate::error::SourceError;
use crate::item::{Item, ItemId};

/// Backend collaborator answering item searches and reverse lookups.
///
/// Implementations are called from a background worker thread, so they may
/// block on I/O. Timeouts and retries are the implementation's concern.
pub trait ItemSource: Send + Sync {
    /// Return the ordered matches for `query`.
    ///
    /// An empty `query` asks for the default, unfiltered candidate list. Zero
    /// matches is `Ok(vec![])`; failures are reported through `Err`.
    fn search_items(&self, query: &str) -> Result<Vec<Item>, SourceError>;

    /// Look up a single item by id, failing with [`SourceError::NotFound`]
    /// when the id is unknown.
    fn resolve_item(&self, id: ItemId) -> Result<Item, SourceError>;
}

/// Closure-backed source adapter.
pub struct FnItemSource<S, R> {
    search: S,
    resolve: R,
}

impl<S, R> FnItemSource<S, R> {
    pub fn new(search: S, resolve: R) -> Self {
        Self { search, resolve }
    }
}

impl<S, R> ItemSource for FnItemSource<S, R>
where
    S: Fn(&str) -> Result<Vec<Item>, SourceError> + Send + Sync,
    R: Fn(ItemId) -> Result<Item, SourceError> + Send + Sync,
{
    fn search_items(&self, query: &str) -> Result<Vec<Item>, SourceError> {
        (self.search)(query)
    }

    fn resolve_item(&self, id: ItemId) -> Result<Item, SourceError> {
        (self.resolve)(id)
    }
}
