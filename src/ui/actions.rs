use anyhow::Result;
use itemsel_source_api::{Candidate, QueryHost};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::EditorOutcome;

impl<'a, H: QueryHost> App<'a, H> {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<EditorOutcome>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(self.outcome())),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(self.outcome()));
            }
            KeyCode::Enter => self.select_highlighted(),
            KeyCode::Tab => self.submit_search(),
            KeyCode::Up => self.move_highlight_up(),
            KeyCode::Down => self.move_highlight_down(),
            _ => {
                if self.search_input.input(key) {
                    self.status = None;
                }
            }
        }
        Ok(None)
    }

    /// Select the highlighted candidate, or the typed text when nothing is
    /// listed.
    pub(crate) fn select_highlighted(&mut self) {
        let candidate = match self.highlighted_candidate() {
            Some(candidate) => candidate.clone(),
            None => {
                let text = self.search_input.text().trim();
                if text.is_empty() {
                    return;
                }
                Candidate::custom(text)
            }
        };

        self.status = None;
        let dispatch = self
            .selector
            .select(candidate, &mut self.query, &mut self.host);
        self.fetches.dispatch(dispatch);
        self.search_input.clear();
    }

    pub(crate) fn submit_search(&mut self) {
        self.status = None;
        let dispatch = self.selector.refresh(self.search_input.text());
        self.fetches.dispatch(dispatch);
    }

    fn move_highlight_up(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected > 0
        {
            self.table_state.select(Some(selected - 1));
        }
    }

    fn move_highlight_down(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected + 1 < self.selector.candidates().len()
        {
            self.table_state.select(Some(selected + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use itemsel_source_api::{Item, ItemId, Query};
    use itemsel_source_catalog::Catalog;

    use super::*;
    use crate::ui::UiConfig;

    #[derive(Default)]
    struct CountingHost {
        changes: usize,
        runs: usize,
    }

    impl QueryHost for CountingHost {
        fn on_change(&mut self, _updated: &Query) {
            self.changes += 1;
        }

        fn on_run_query(&mut self) {
            self.runs += 1;
        }
    }

    fn app(query: Query) -> App<'static, CountingHost> {
        let catalog = Catalog::new([
            Item::new(4151, "Abyssal whip"),
            Item::new(1333, "Rune scimitar"),
        ]);
        let mut app = App::new(
            Arc::new(catalog),
            query,
            CountingHost::default(),
            UiConfig::default(),
        );
        app.mount();
        settle(&mut app);
        app
    }

    fn settle(app: &mut App<'_, CountingHost>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.fetches.is_in_flight() && Instant::now() < deadline {
            app.pump_fetch_results();
            thread::sleep(Duration::from_millis(5));
        }
        app.pump_fetch_results();
    }

    fn press(app: &mut App<'_, CountingHost>, code: KeyCode) -> Option<EditorOutcome> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .expect("key handled")
    }

    fn type_text(app: &mut App<'_, CountingHost>, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn enter_commits_highlighted_candidate() {
        let mut app = app(Query::new("A"));
        assert_eq!(app.selector.candidates().len(), 2);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(app.query().item_id, Some(ItemId::new(4151)));
        assert_eq!(app.host().changes, 1);
        assert_eq!(app.host().runs, 1);
        assert_eq!(app.selector.selection().value(), Some("4151"));
    }

    #[test]
    fn highlight_stays_within_candidates() {
        let mut app = app(Query::new("A"));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.table_state.selected(), Some(0));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn tab_searches_typed_text() {
        let mut app = app(Query::new("A"));

        type_text(&mut app, "whip");
        press(&mut app, KeyCode::Tab);
        settle(&mut app);

        let labels: Vec<_> = app
            .selector
            .candidates()
            .iter()
            .map(|candidate| candidate.label.as_str())
            .collect();
        assert_eq!(labels, ["Abyssal whip"]);
    }

    #[test]
    fn enter_without_candidates_selects_typed_text() {
        let mut app = app(Query::new("A"));

        type_text(&mut app, "qqqq");
        press(&mut app, KeyCode::Tab);
        settle(&mut app);
        assert!(app.selector.candidates().is_empty());

        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(app.selector.selection().value(), Some("qqqq"));
        assert_eq!(app.query().item_id, None);
        assert_eq!(app.host().runs, 0);
        assert!(app.search_input.text().is_empty());
    }

    #[test]
    fn editing_text_clears_the_status_line() {
        let mut app = app(Query::new("A"));
        app.status = Some("search for \"x\" failed".into());

        press(&mut app, KeyCode::Left);
        assert!(app.status.is_some());

        type_text(&mut app, "w");
        assert_eq!(app.status, None);
    }

    #[test]
    fn escape_returns_final_query() {
        let mut app = app(Query::new("A").with_item_id(1333));

        let outcome = press(&mut app, KeyCode::Esc).expect("editor closes");
        assert_eq!(outcome.query.item_id, Some(ItemId::new(1333)));
        assert_eq!(
            outcome.selection.map(|candidate| candidate.label),
            Some("Rune scimitar".to_string())
        );
    }
}
