use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

/// Single-line free-text field backing the picker prompt.
pub struct SearchInput<'a> {
    textarea: TextArea<'a>,
    placeholder: String,
}

impl<'a> SearchInput<'a> {
    pub fn new(initial: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            textarea: Self::textarea(initial.into(), &placeholder),
            placeholder,
        }
    }

    fn textarea(text: String, placeholder: &str) -> TextArea<'a> {
        let mut textarea = TextArea::new(vec![text]);
        textarea.move_cursor(CursorMove::End);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(placeholder.to_string());
        textarea
    }

    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Feed a key to the field, returning whether the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let before = self.text().to_string();
        self.textarea.input(key);
        before != self.text()
    }

    pub fn clear(&mut self) {
        self.textarea = Self::textarea(String::new(), &self.placeholder);
    }

    pub(crate) fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
