use std::sync::mpsc::TryRecvError;

use anyhow::Error;
use itemsel_source_api::QueryHost;
use tracing::warn;

use super::App;
use crate::selector::FetchCompletion;

impl<'a, H: QueryHost> App<'a, H> {
    /// Drain finished fetches into the selector.
    pub(crate) fn pump_fetch_results(&mut self) {
        loop {
            match self.fetches.try_recv() {
                Ok(completion) => self.handle_completion(completion),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.status = Some("item source worker stopped".to_string());
                    break;
                }
            }
        }
    }

    fn handle_completion(&mut self, completion: FetchCompletion) {
        if let Err(err) = self
            .selector
            .complete(completion, &mut self.query, &mut self.host)
        {
            let message = format!("{:#}", Error::new(err));
            warn!(error = %message, "item fetch failed");
            self.status = Some(message);
        }
        self.ensure_highlight();
    }
}
