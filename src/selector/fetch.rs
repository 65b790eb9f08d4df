use itemsel_source_api::{Item, ItemId, ItemSource, SourceError};

/// Monotonic tag attached to every dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Which external operation a fetch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    Search { text: String },
    Resolve { id: ItemId },
}

/// A fetch the selector wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub kind: FetchKind,
}

/// Result of running a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Search(Result<Vec<Item>, SourceError>),
    Resolve(Result<Item, SourceError>),
}

/// A finished fetch, tagged with the ticket of the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub outcome: FetchOutcome,
}

impl FetchRequest {
    /// Run the request against `source` on the calling thread.
    pub fn run(&self, source: &dyn ItemSource) -> FetchCompletion {
        let outcome = match &self.kind {
            FetchKind::Search { text } => FetchOutcome::Search(source.search_items(text)),
            FetchKind::Resolve { id } => FetchOutcome::Resolve(source.resolve_item(*id)),
        };
        FetchCompletion {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// What an event asks of the fetch driver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Dispatch {
    Fetch(FetchRequest),
    /// The event was absorbed without fetching, e.g. while the control is
    /// locked. Distinct from a fetch that returns no results.
    NoFetch,
}

impl Dispatch {
    #[must_use]
    pub fn into_request(self) -> Option<FetchRequest> {
        match self {
            Self::Fetch(request) => Some(request),
            Self::NoFetch => None,
        }
    }
}
