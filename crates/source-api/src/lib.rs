//! Shared data model and collaborator traits for the `itemsel` item picker.
//!
//! Sources implement [`ItemSource`] to answer searches and reverse lookups,
//! while embedders implement [`QueryHost`] to receive committed queries.

pub mod error;
pub mod item;
pub mod query;
pub mod source;

pub use error::SourceError;
pub use item::{Candidate, Item, ItemId, NOT_FOUND_LABEL, NO_RESULTS_LABEL};
pub use query::{Query, QueryHost};
pub use source::{FnItemSource, ItemSource};
