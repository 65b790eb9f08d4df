use itemsel_source_api::{ItemId, Query, QueryHost};
use tracing::{debug, info};

use super::Selection;

/// What the commit policy did with a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing is selected.
    NoSelection,
    /// The value matches the last processed one.
    Unchanged,
    /// The value was recorded but is not an item id, so the query keeps its
    /// previous id.
    Recorded,
    /// The id was written to the query and a run was requested.
    Committed(ItemId),
}

/// Pushes selection changes into the host query, once per distinct value.
#[derive(Debug, Default)]
pub(crate) struct CommitPolicy {
    last_committed: Option<String>,
}

impl CommitPolicy {
    pub(crate) fn last_committed(&self) -> Option<&str> {
        self.last_committed.as_deref()
    }

    pub(crate) fn apply<H>(
        &mut self,
        selection: &Selection,
        query: &mut Query,
        host: &mut H,
    ) -> CommitOutcome
    where
        H: QueryHost + ?Sized,
    {
        let Some(candidate) = selection.candidate() else {
            return CommitOutcome::NoSelection;
        };

        if self.last_committed.as_deref() == Some(candidate.value.as_str()) {
            return CommitOutcome::Unchanged;
        }
        self.last_committed = Some(candidate.value.clone());

        let Some(id) = candidate.item_id() else {
            debug!(value = %candidate.value, "selection is not an item id; query left as is");
            return CommitOutcome::Recorded;
        };

        query.item_id = Some(id);
        host.on_change(query);
        host.on_run_query();
        info!(item_id = %id, label = %candidate.label, "committed item selection");
        CommitOutcome::Committed(id)
    }
}
