use thiserror::Error;

use crate::item::ItemId;

/// Failures reported by an [`ItemSource`](crate::ItemSource).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The backend could not be reached or answered with an error.
    #[error("item fetch failed: {message}")]
    FetchFailed { message: String },

    /// A reverse lookup named an id the backend does not know.
    #[error("item {id} not found")]
    NotFound { id: ItemId },
}

impl SourceError {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
        }
    }
}
