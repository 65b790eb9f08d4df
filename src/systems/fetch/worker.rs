use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use itemsel_source_api::ItemSource;
use tracing::{debug, trace};

use super::commands::FetchCommand;
use crate::selector::FetchCompletion;

/// Launches the background fetch worker thread and returns its channels.
pub(crate) fn spawn(
    source: Arc<dyn ItemSource>,
) -> (Sender<FetchCommand>, Receiver<FetchCompletion>) {
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();

    thread::spawn(move || worker_loop(source.as_ref(), command_rx, result_tx));

    (command_tx, result_rx)
}

fn worker_loop(
    source: &dyn ItemSource,
    command_rx: Receiver<FetchCommand>,
    result_tx: Sender<FetchCompletion>,
) {
    while let Ok(command) = command_rx.recv() {
        if !handle_command(source, &result_tx, command) {
            break;
        }
    }
    trace!("fetch worker stopped");
}

fn handle_command(
    source: &dyn ItemSource,
    result_tx: &Sender<FetchCompletion>,
    command: FetchCommand,
) -> bool {
    match command {
        FetchCommand::Fetch(request) => {
            debug!(ticket = request.ticket.get(), kind = ?request.kind, "running fetch");
            result_tx.send(request.run(source)).is_ok()
        }
        FetchCommand::Shutdown => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use itemsel_source_api::{FnItemSource, Item, ItemId, SourceError};

    use super::*;
    use crate::selector::{FetchKind, FetchOutcome, FetchRequest, FetchTicket};

    fn source() -> Arc<dyn ItemSource> {
        Arc::new(FnItemSource::new(
            |query: &str| -> Result<Vec<Item>, SourceError> {
                Ok(vec![Item::new(1, format!("match for {query}"))])
            },
            |id: ItemId| -> Result<Item, SourceError> { Err(SourceError::NotFound { id }) },
        ))
    }

    fn request(kind: FetchKind) -> FetchRequest {
        FetchRequest {
            ticket: FetchTicket::first(),
            kind,
        }
    }

    #[test]
    fn shutdown_command_stops_worker() {
        let (tx, rx) = spawn(source());
        tx.send(FetchCommand::Shutdown).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());
    }

    #[test]
    fn search_results_are_forwarded() {
        let (tx, rx) = spawn(source());
        let request = request(FetchKind::Search { text: "whip".into() });
        let ticket = request.ticket;
        tx.send(FetchCommand::Fetch(request)).expect("send fetch");

        let completion = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("receive completion");

        assert_eq!(completion.ticket, ticket);
        assert_eq!(
            completion.outcome,
            FetchOutcome::Search(Ok(vec![Item::new(1, "match for whip")]))
        );
        tx.send(FetchCommand::Shutdown).expect("send shutdown");
    }

    #[test]
    fn resolve_failures_are_forwarded() {
        let (tx, rx) = spawn(source());
        tx.send(FetchCommand::Fetch(request(FetchKind::Resolve {
            id: ItemId::new(9),
        })))
        .expect("send fetch");

        let completion = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("receive completion");
        assert_eq!(
            completion.outcome,
            FetchOutcome::Resolve(Err(SourceError::NotFound { id: ItemId::new(9) }))
        );
    }
}
