use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use crate::app::{App, AppMode};
use crate::language::Language;
use crate::ui::input::TextInput;

/// Query input plus the language selector, framed in one bordered box.
pub struct SearchBar<'a> {
    pub query: &'a str,
    pub language: Language,
    pub focused: bool,
}

impl<'a> SearchBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            query: &app.search_input,
            language: app.language,
            focused: app.mode == AppMode::Search,
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let selector = LanguageSelector::new(self.language);
        let selector_width = selector.width();
        let [input_area, selector_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(selector_width),
        ])
        .areas(inner);

        TextInput::new("> ", self.query)
            .focused(self.focused)
            .render(input_area, buf);
        selector.render(selector_area, buf);
    }
}

/// The two-entry language picker, shown as `◂ Label (code) ▸`.
pub struct LanguageSelector {
    language: Language,
}

impl LanguageSelector {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn text(&self) -> String {
        format!(
            " \u{25C2} {} ({}) \u{25B8} ",
            self.language.label(),
            self.language.code()
        )
    }

    pub fn width(&self) -> u16 {
        self.text().chars().count() as u16
    }
}

impl Widget for LanguageSelector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
