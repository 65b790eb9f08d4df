use crate::selector::FetchRequest;

/// Commands understood by the background fetch worker.
#[derive(Debug)]
pub(crate) enum FetchCommand {
    /// Run a search or reverse lookup against the item source.
    Fetch(FetchRequest),
    /// Stop the background worker thread.
    Shutdown,
}
