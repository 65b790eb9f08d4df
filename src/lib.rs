//! Item picker that keeps a query's stored item id in sync with what the user
//! selects.
//!
//! The [`selector`] module holds the reconciliation state machine. [`ui`] runs
//! it inside a terminal query editor, with fetches executed on a background
//! worker by [`FetchRuntime`].

pub mod app_dirs;
pub mod host;
pub mod logging;
pub mod selector;
mod systems;
pub mod ui;

pub use selector::{
    CommitOutcome, Dispatch, FetchCompletion, FetchKind, FetchOutcome, FetchRequest, FetchTicket,
    GateState, ItemSelector, Selection, SelectorError,
};
pub use systems::fetch::FetchRuntime;

pub use itemsel_source_api::{
    Candidate, FnItemSource, Item, ItemId, ItemSource, NO_RESULTS_LABEL, NOT_FOUND_LABEL, Query,
    QueryHost, SourceError,
};
pub use itemsel_source_catalog::{Catalog, CatalogError};
