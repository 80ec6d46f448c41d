use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::{App, AppMode};
use crate::language::Language;

/// Bottom status bar showing mode, language, result count, and loading state.
pub struct StatusBar {
    pub mode: AppMode,
    pub language: Language,
    pub result_count: usize,
    pub loading: bool,
}

impl StatusBar {
    pub fn new(app: &App) -> Self {
        Self {
            mode: app.mode.clone(),
            language: app.language,
            result_count: app.cards.len(),
            loading: app.is_loading(),
        }
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        // Background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let mut spans = Vec::new();

        // Mode indicator
        let (mode_str, mode_color) = match self.mode {
            AppMode::Normal => (" NORMAL ", Color::Blue),
            AppMode::Command => (" COMMAND ", Color::Magenta),
            AppMode::Search => (" SEARCH ", Color::Yellow),
        };
        let mode_style = Style::default()
            .bg(mode_color)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        spans.push(Span::styled(mode_str, mode_style));
        spans.push(Span::styled(
            format!(" {} ", self.language.label()),
            bg_style,
        ));
        spans.push(Span::styled(
            format!("\u{2502} {} result(s)", self.result_count),
            bg_style,
        ));

        // Loading indicator
        if self.loading {
            spans.push(Span::styled(
                " [loading...]",
                Style::default().bg(Color::DarkGray).fg(Color::Yellow),
            ));
        }

        // Key hint (right-aligned)
        let hint = "? help ";
        let left_width: usize = spans.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_width + hint.len());
        if padding > 0 {
            spans.push(Span::styled(" ".repeat(padding), bg_style));
            spans.push(Span::styled(hint, bg_style.fg(Color::Gray)));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
