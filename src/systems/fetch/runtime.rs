use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use itemsel_source_api::ItemSource;
use tracing::warn;

use super::commands::FetchCommand;
use crate::selector::{Dispatch, FetchCompletion};

/// Owns the background fetch worker and tracks requests still in flight.
pub struct FetchRuntime {
    tx: Sender<FetchCommand>,
    rx: Receiver<FetchCompletion>,
    in_flight: usize,
}

impl FetchRuntime {
    pub fn spawn(source: Arc<dyn ItemSource>) -> Self {
        let (tx, rx) = super::spawn(source);
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Hand a selector dispatch to the worker. `NoFetch` is ignored.
    pub fn dispatch(&mut self, dispatch: Dispatch) {
        let Some(request) = dispatch.into_request() else {
            return;
        };
        if self.tx.send(FetchCommand::Fetch(request)).is_ok() {
            self.in_flight += 1;
        } else {
            warn!("fetch worker is gone; request dropped");
        }
    }

    pub fn try_recv(&mut self) -> Result<FetchCompletion, TryRecvError> {
        let completion = self.rx.try_recv()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(completion)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(FetchCommand::Shutdown);
    }
}

impl Drop for FetchRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use itemsel_source_api::{FnItemSource, Item, ItemId, Query, SourceError};

    use super::*;
    use crate::selector::{FetchOutcome, ItemSelector};

    fn wait_for_completion(runtime: &mut FetchRuntime) -> FetchCompletion {
        let deadline = Instant::now() + Duration::from_secs(1);
        loop {
            match runtime.try_recv() {
                Ok(completion) => return completion,
                Err(TryRecvError::Empty) if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(err) => panic!("no completion: {err:?}"),
            }
        }
    }

    #[test]
    fn tracks_in_flight_requests() {
        let source = Arc::new(FnItemSource::new(
            |_: &str| -> Result<Vec<Item>, SourceError> { Ok(vec![Item::new(3, "Bronze bar")]) },
            |id: ItemId| -> Result<Item, SourceError> { Err(SourceError::NotFound { id }) },
        ));
        let mut runtime = FetchRuntime::spawn(source);
        let mut selector = ItemSelector::new();

        runtime.dispatch(Dispatch::NoFetch);
        assert!(!runtime.is_in_flight());

        runtime.dispatch(selector.mount(&Query::default()));
        assert!(runtime.is_in_flight());

        let completion = wait_for_completion(&mut runtime);
        assert!(!runtime.is_in_flight());
        assert_eq!(
            completion.outcome,
            FetchOutcome::Search(Ok(vec![Item::new(3, "Bronze bar")]))
        );
    }
}
