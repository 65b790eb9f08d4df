use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use itemsel_source_api::{ItemSource, Query, QueryHost};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::debug;

use super::App;
use super::config::UiConfig;
use super::state::EditorOutcome;

/// Mount the picker for `query` and run it until the user closes it.
///
/// Returns the final query together with the host so callers can inspect
/// what was committed.
pub fn run<H: QueryHost>(
    source: Arc<dyn ItemSource>,
    query: Query,
    host: H,
    ui: UiConfig,
) -> Result<(EditorOutcome, H)> {
    let mut app = App::new(source, query, host, ui);
    let outcome = app.run()?;
    Ok((outcome, app.host))
}

impl<'a, H: QueryHost> App<'a, H> {
    /// Pump the terminal event loop until the user exits.
    pub fn run(&mut self) -> Result<EditorOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        self.mount();

        let (event_tx, event_rx) = mpsc::channel();
        let event_loop_running = Arc::new(AtomicBool::new(true));
        let event_loop_flag = Arc::clone(&event_loop_running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while event_loop_flag.load(Ordering::Relaxed) {
                if event::poll(Duration::from_millis(50))? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let mut pending_events = VecDeque::new();

        let result: Result<EditorOutcome> = 'event_loop: loop {
            self.pump_fetch_results();
            self.throbber_state.calc_next();

            loop {
                match event_rx.try_recv() {
                    Ok(Event::Resize(_, _)) => {}
                    Ok(event) => pending_events.push_back(event),
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        break 'event_loop Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break 'event_loop Err(err.into());
            }

            let mut maybe_outcome = None;
            while let Some(event) = pending_events.pop_front() {
                if let Event::Key(key) = event
                    && key.kind == KeyEventKind::Press
                {
                    match self.handle_key(key) {
                        Ok(Some(outcome)) => {
                            maybe_outcome = Some(outcome);
                            break;
                        }
                        Ok(None) => {}
                        Err(err) => break 'event_loop Err(err),
                    }
                }
            }

            if let Some(outcome) = maybe_outcome {
                break Ok(outcome);
            }

            thread::sleep(Duration::from_millis(16));
        };

        ratatui::restore();
        self.selector.unmount();
        debug!("item picker closed");

        event_loop_running.store(false, Ordering::Relaxed);
        match event_thread.join() {
            Ok(join_result) => join_result?,
            Err(err) => std::panic::resume_unwind(err),
        }

        result
    }
}
