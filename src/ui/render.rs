use itemsel_source_api::QueryHost;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use throbber_widgets_tui::Throbber;

use super::App;

const HINT: &str = "Tab search  Enter select  Up/Down move  Esc close";

impl<'a, H: QueryHost> App<'a, H> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_prompt(frame, layout[0]);
        self.render_selection(frame, layout[1]);
        self.render_candidates(frame, layout[2]);
        self.render_status(frame, layout[3]);
    }

    fn render_prompt(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!("{}: ", self.ui.title);
        let title_width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let [label_area, input_area, throbber_area] = Layout::horizontal([
            Constraint::Length(title_width),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(title).style(self.theme.prompt_style()),
            label_area,
        );
        self.search_input.render(frame, input_area);

        if self.is_loading() {
            let throbber = Throbber::default();
            frame.render_stateful_widget(throbber, throbber_area, &mut self.throbber_state);
        }
    }

    fn render_selection(&self, frame: &mut Frame, area: Rect) {
        let line = match self.selector.selection().candidate() {
            Some(candidate) => {
                let mut spans = vec![
                    Span::raw("Selected: "),
                    Span::styled(candidate.label.clone(), self.theme.header_style()),
                ];
                if self.selector.is_locked() {
                    spans.push(Span::styled(" [locked]", self.theme.locked_style()));
                }
                Line::from(spans)
            }
            None => Line::from(Span::styled(
                self.ui.placeholder.clone(),
                self.theme.empty_style(),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_candidates(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(["Item", "ID", "Icon"]).style(self.theme.header_style());
        let rows = self.selector.candidates().iter().map(|candidate| {
            Row::new([
                Cell::from(candidate.label.clone()),
                Cell::from(candidate.value.clone()),
                Cell::from(candidate.icon.clone().unwrap_or_default()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(50),
                Constraint::Length(10),
                Constraint::Min(4),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::TOP))
        .row_highlight_style(self.theme.row_highlight_style());
        frame.render_stateful_widget(table, area, &mut self.table_state);

        if self.selector.candidates().is_empty() {
            const HEADER_AND_DIVIDER_HEIGHT: u16 = 2;
            let mut message_area = area;
            if message_area.height > HEADER_AND_DIVIDER_HEIGHT {
                message_area.y += HEADER_AND_DIVIDER_HEIGHT;
                message_area.height -= HEADER_AND_DIVIDER_HEIGHT;
                let message = if self.is_loading() {
                    "Loading..."
                } else {
                    "No candidates"
                };
                let empty = Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(self.theme.empty_style());
                frame.render_widget(Clear, message_area);
                frame.render_widget(empty, message_area);
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = match &self.status {
            Some(message) => Paragraph::new(message.as_str()).style(self.theme.error_style()),
            None => Paragraph::new(HINT).style(self.theme.empty_style()),
        };
        frame.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use itemsel_source_api::{Candidate, Item, ItemSource, Query};
    use itemsel_source_catalog::Catalog;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::ui::UiConfig;

    #[derive(Default)]
    struct NullHost;

    impl QueryHost for NullHost {
        fn on_change(&mut self, _updated: &Query) {}
        fn on_run_query(&mut self) {}
    }

    fn catalog() -> Arc<dyn ItemSource> {
        Arc::new(Catalog::new([
            Item::new(4151, "Abyssal whip"),
            Item::new(1333, "Rune scimitar"),
        ]))
    }

    fn settle(app: &mut App<'_, NullHost>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.fetches.is_in_flight() && Instant::now() < deadline {
            app.pump_fetch_results();
            thread::sleep(Duration::from_millis(5));
        }
        app.pump_fetch_results();
    }

    fn render(app: &mut App<'_, NullHost>) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| app.draw(frame)).expect("draw");
        terminal.backend().to_string()
    }

    #[test]
    fn lists_default_candidates_after_mount() {
        let mut app = App::new(catalog(), Query::new("A"), NullHost, UiConfig::default());
        app.mount();
        settle(&mut app);

        let screen = render(&mut app);
        assert!(screen.contains("Item: "));
        assert!(screen.contains("Select item"));
        assert!(screen.contains("Rune scimitar"));
        assert!(screen.contains("4151"));
    }

    #[test]
    fn shows_resolved_item_as_locked() {
        let query = Query::new("A").with_item_id(4151);
        let mut app = App::new(catalog(), query, NullHost, UiConfig::default());
        app.mount();
        settle(&mut app);

        let screen = render(&mut app);
        assert!(screen.contains("Selected: Abyssal whip"));
        assert!(screen.contains("[locked]"));
    }

    #[test]
    fn reports_missing_configured_item() {
        let query = Query::new("A").with_item_id(99);
        let mut app = App::new(catalog(), query, NullHost, UiConfig::default());
        app.mount();
        settle(&mut app);

        let screen = render(&mut app);
        assert!(screen.contains(&Candidate::not_found().label));
        assert!(screen.contains("could not be resolved"));
    }
}
