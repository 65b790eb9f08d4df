use std::sync::Arc;

use itemsel_source_api::{Candidate, ItemSource, Query, QueryHost};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;

use super::config::UiConfig;
use super::input::SearchInput;
use super::style::Theme;
use crate::selector::ItemSelector;
use crate::systems::fetch::FetchRuntime;

/// Final state reported when the editor closes.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOutcome {
    pub query: Query,
    pub selection: Option<Candidate>,
}

/// Query editor hosting the item picker.
pub struct App<'a, H: QueryHost> {
    pub(crate) selector: ItemSelector,
    pub(crate) fetches: FetchRuntime,
    pub(crate) query: Query,
    pub(crate) host: H,
    pub search_input: SearchInput<'a>,
    pub(crate) table_state: TableState,
    pub(crate) ui: UiConfig,
    pub theme: Theme,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) status: Option<String>,
}

impl<'a, H: QueryHost> App<'a, H> {
    pub fn new(source: Arc<dyn ItemSource>, query: Query, host: H, ui: UiConfig) -> Self {
        Self {
            selector: ItemSelector::new(),
            fetches: FetchRuntime::spawn(source),
            query,
            host,
            search_input: SearchInput::new(String::new(), ui.placeholder.clone()),
            table_state: TableState::default(),
            ui,
            theme: Theme::default(),
            throbber_state: ThrobberState::default(),
            status: None,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn selector(&self) -> &ItemSelector {
        &self.selector
    }

    /// Mount the picker, resolving a stored id or fetching default candidates.
    pub fn mount(&mut self) {
        let dispatch = self.selector.mount(&self.query);
        self.fetches.dispatch(dispatch);
    }

    pub(crate) fn outcome(&self) -> EditorOutcome {
        EditorOutcome {
            query: self.query.clone(),
            selection: self.selector.selection().candidate().cloned(),
        }
    }

    pub(crate) fn highlighted_candidate(&self) -> Option<&Candidate> {
        let index = self.table_state.selected()?;
        self.selector.candidates().get(index)
    }

    pub(crate) fn ensure_highlight(&mut self) {
        let len = self.selector.candidates().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
            Some(selected) if selected >= len => self.table_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.fetches.is_in_flight() || self.selector.is_awaiting()
    }
}
