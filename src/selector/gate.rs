use itemsel_source_api::ItemId;

use super::fetch::FetchTicket;

/// Progress of the one-time reverse lookup of a query's stored item id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// The editor has not been mounted yet.
    #[default]
    Unmounted,
    /// Waiting for the stored id to resolve into a display candidate.
    Resolving { id: ItemId, ticket: FetchTicket },
    Resolved,
    Failed,
    /// The query carried no usable id, so there was nothing to resolve.
    Skipped,
}

impl GateState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Resolving { .. })
    }
}
