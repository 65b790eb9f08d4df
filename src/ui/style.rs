use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header: Style,
    pub row_highlight: Style,
    pub prompt: Style,
    pub empty: Style,
    pub locked: Style,
    pub error: Style,
}

impl Theme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        self.header
    }

    #[must_use]
    pub fn row_highlight_style(&self) -> Style {
        self.row_highlight
    }

    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn locked_style(&self) -> Style {
        self.locked
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            row_highlight: Style::new().bg(Color::DarkGray),
            prompt: Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            empty: Style::new().fg(Color::DarkGray),
            locked: Style::new().fg(Color::Yellow),
            error: Style::new().fg(Color::Red),
        }
    }
}
