//! Reconciliation state machine behind the item picker.
//!
//! Three flows meet here: the free text the user searches with, the
//! asynchronous search results for that text, and the item id persisted in the
//! host query. The selector never performs I/O itself. Each event returns a
//! [`Dispatch`] describing the fetch it wants, and the driver feeds finished
//! fetches back through [`ItemSelector::complete`].
//!
//! ```text
//! Init -> Resolving -------> Ready <-+
//!    \                        ^  |   |
//!     +-> SearchingInitial ---+  +---+ user selection
//! ```

mod commit;
mod fetch;
mod gate;


use itemsel_source_api::{Candidate, Item, ItemId, Query, QueryHost, SourceError};
use thiserror::Error;
use tracing::{debug, trace, warn};

pub use commit::CommitOutcome;
pub use fetch::{Dispatch, FetchCompletion, FetchKind, FetchOutcome, FetchRequest, FetchTicket};
pub use gate::GateState;

use commit::CommitPolicy;

/// Failures surfaced to the host after the selector has already recovered
/// into a sentinel selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("search for {text:?} failed")]
    Search {
        text: String,
        #[source]
        source: SourceError,
    },

    #[error("configured item {id} could not be resolved")]
    Resolve {
        id: ItemId,
        #[source]
        source: SourceError,
    },
}

/// The candidate currently shown in the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Absent,
    Chosen(Candidate),
}

impl Selection {
    #[must_use]
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Absent => None,
            Self::Chosen(candidate) => Some(candidate),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.candidate().map(|candidate| candidate.value.as_str())
    }
}

#[derive(Debug)]
struct PendingSearch {
    ticket: FetchTicket,
    text: String,
}

/// Per-editor picker state, created at mount and discarded at unmount.
#[derive(Debug)]
pub struct ItemSelector {
    mounted: bool,
    gate: GateState,
    selection: Selection,
    commit: CommitPolicy,
    candidates: Vec<Candidate>,
    locked: bool,
    suppress_initial_search: bool,
    user_touched: bool,
    pending_search: Option<PendingSearch>,
    next_ticket: FetchTicket,
}

impl Default for ItemSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSelector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mounted: false,
            gate: GateState::Unmounted,
            selection: Selection::Absent,
            commit: CommitPolicy::default(),
            candidates: Vec::new(),
            locked: false,
            suppress_initial_search: false,
            user_touched: false,
            pending_search: None,
            next_ticket: FetchTicket::first(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// True once a stored id resolved, until the user edits the selection.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn last_committed(&self) -> Option<&str> {
        self.commit.last_committed()
    }

    /// True while a search or the reverse lookup has not completed.
    pub fn is_awaiting(&self) -> bool {
        self.pending_search.is_some() || self.gate.is_pending()
    }

    /// Start the editor for `query`.
    ///
    /// A stored id is resolved before anything else and the first automatic
    /// search is suppressed; without one, the default candidate list is
    /// fetched with an empty search. Mounting twice is a no-op.
    pub fn mount(&mut self, query: &Query) -> Dispatch {
        if self.mounted {
            trace!("selector already mounted");
            return Dispatch::NoFetch;
        }
        self.mounted = true;

        let resolve = match query.item_id {
            Some(id) => {
                let ticket = self.issue_ticket();
                self.gate = GateState::Resolving { id, ticket };
                self.suppress_initial_search = true;
                debug!(item_id = %id, "resolving configured item");
                Some(FetchRequest {
                    ticket,
                    kind: FetchKind::Resolve { id },
                })
            }
            None => {
                self.gate = GateState::Skipped;
                None
            }
        };

        let initial = self.load_search(String::new());
        match resolve {
            Some(request) => Dispatch::Fetch(request),
            None => initial,
        }
    }

    /// The user picked `candidate`, either from the list or as free text.
    pub fn select<H>(&mut self, candidate: Candidate, query: &mut Query, host: &mut H) -> Dispatch
    where
        H: QueryHost + ?Sized,
    {
        if !self.mounted {
            return Dispatch::NoFetch;
        }
        self.note_user_edit();

        let text = candidate.value.clone();
        self.set_selection(candidate, query, host);
        self.load_search(text)
    }

    /// The user submitted `text` as a search without changing the selection.
    pub fn refresh(&mut self, text: impl Into<String>) -> Dispatch {
        if !self.mounted {
            return Dispatch::NoFetch;
        }
        self.note_user_edit();
        self.load_search(text.into())
    }

    /// Apply a finished fetch.
    ///
    /// Failures are recovered into a sentinel selection before being returned
    /// so the host can report them. Completions for superseded searches and
    /// anything arriving after unmount are dropped.
    pub fn complete<H>(
        &mut self,
        completion: FetchCompletion,
        query: &mut Query,
        host: &mut H,
    ) -> Result<(), SelectorError>
    where
        H: QueryHost + ?Sized,
    {
        if !self.mounted {
            trace!(ticket = completion.ticket.get(), "dropping completion after unmount");
            return Ok(());
        }

        match completion.outcome {
            FetchOutcome::Search(result) => self.complete_search(completion.ticket, result, query, host),
            FetchOutcome::Resolve(result) => {
                self.complete_resolve(completion.ticket, result, query, host)
            }
        }
    }

    /// Tear down the editor. Later completions become no-ops.
    pub fn unmount(&mut self) {
        let next_ticket = self.next_ticket;
        *self = Self::new();
        self.next_ticket = next_ticket;
    }

    fn complete_search<H>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Item>, SourceError>,
        query: &mut Query,
        host: &mut H,
    ) -> Result<(), SelectorError>
    where
        H: QueryHost + ?Sized,
    {
        let Some(pending) = self
            .pending_search
            .take_if(|pending| pending.ticket == ticket)
        else {
            debug!(ticket = ticket.get(), "discarding stale search results");
            return Ok(());
        };

        match result {
            Ok(items) => {
                let candidates: Vec<Candidate> = items.into_iter().map(Candidate::from).collect();
                let exact = candidates
                    .iter()
                    .find(|candidate| candidate.value == pending.text)
                    .and_then(Candidate::item_id);
                if let Some(id) = exact {
                    debug!(item_id = %id, "search text names an existing item");
                    query.item_id = Some(id);
                }
                debug!(text = %pending.text, results = candidates.len(), "search completed");
                self.candidates = candidates;
                Ok(())
            }
            Err(source) => {
                warn!(text = %pending.text, error = %source, "item search failed");
                self.candidates.clear();
                self.set_selection(Candidate::no_results(), query, host);
                Err(SelectorError::Search {
                    text: pending.text,
                    source,
                })
            }
        }
    }

    fn complete_resolve<H>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Item, SourceError>,
        query: &mut Query,
        host: &mut H,
    ) -> Result<(), SelectorError>
    where
        H: QueryHost + ?Sized,
    {
        let GateState::Resolving {
            id,
            ticket: expected,
        } = self.gate
        else {
            debug!(ticket = ticket.get(), "ignoring unexpected resolve result");
            return Ok(());
        };
        if ticket != expected {
            debug!(ticket = ticket.get(), "ignoring superseded resolve result");
            return Ok(());
        }

        match result {
            Ok(item) => {
                self.gate = GateState::Resolved;
                if self.user_touched {
                    debug!(item_id = %id, "user edited before the configured item resolved");
                    return Ok(());
                }
                self.locked = true;
                self.set_selection(Candidate::from(item), query, host);
                Ok(())
            }
            Err(source) => {
                self.gate = GateState::Failed;
                warn!(item_id = %id, error = %source, "configured item could not be resolved");
                if !self.user_touched {
                    self.candidates.clear();
                    self.set_selection(Candidate::not_found(), query, host);
                }
                Err(SelectorError::Resolve { id, source })
            }
        }
    }

    fn set_selection<H>(&mut self, candidate: Candidate, query: &mut Query, host: &mut H)
    where
        H: QueryHost + ?Sized,
    {
        self.selection = Selection::Chosen(candidate);
        let outcome = self.commit.apply(&self.selection, query, host);
        trace!(?outcome, "commit policy applied");
    }

    fn note_user_edit(&mut self) {
        self.user_touched = true;
        self.locked = false;
        self.suppress_initial_search = false;
    }

    fn load_search(&mut self, text: String) -> Dispatch {
        if self.locked || self.suppress_initial_search {
            self.suppress_initial_search = false;
            trace!("search suppressed");
            return Dispatch::NoFetch;
        }

        let ticket = self.issue_ticket();
        debug!(ticket = ticket.get(), text = %text, "dispatching item search");
        self.pending_search = Some(PendingSearch {
            ticket,
            text: text.clone(),
        });
        Dispatch::Fetch(FetchRequest {
            ticket,
            kind: FetchKind::Search { text },
        })
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        ticket
    }
}
