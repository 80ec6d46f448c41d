use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use ratatui_image::StatefulImage;
use unicode_width::UnicodeWidthStr;

use crate::api::types::SearchResult;
use crate::app::{Card, ThumbnailSlot};
use crate::language::Language;

/// Columns reserved for the thumbnail on the left of each card.
pub const THUMBNAIL_WIDTH: u16 = 16;
/// Rows the thumbnail occupies; also the minimum card height.
pub const THUMBNAIL_HEIGHT: u16 = 6;
/// Extracts longer than this are cut with an ellipsis.
const MAX_EXTRACT_LINES: usize = 8;

/// Render one card: thumbnail slot on the left, text on the right.
pub fn render_card(frame: &mut Frame, card: &mut Card, selected: bool, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let [thumb_area, _, text_area] = Layout::horizontal([
        Constraint::Length(THUMBNAIL_WIDTH),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(area);
    let thumb_area = Rect {
        height: thumb_area.height.min(THUMBNAIL_HEIGHT),
        ..thumb_area
    };

    match card.thumbnail {
        ThumbnailSlot::Loaded(ref mut protocol) => {
            frame.render_stateful_widget(StatefulImage::default(), thumb_area, protocol.as_mut());
        }
        ThumbnailSlot::Loading => {
            frame.render_widget(Placeholder::new("loading\u{2026}"), thumb_area);
        }
        ThumbnailSlot::Placeholder => {
            frame.render_widget(Placeholder::new("no image"), thumb_area);
        }
    }

    frame.render_widget(
        CardText::new(&card.result)
            .language(card.language)
            .selected(selected),
        text_area,
    );
}

/// Height in lines needed for a card whose text column is `width` wide.
pub fn card_height(result: &SearchResult, width: u16) -> u16 {
    let text_width = width.saturating_sub(THUMBNAIL_WIDTH + 1);
    let extract_lines = wrap_text(&result.extract, text_width as usize)
        .len()
        .min(MAX_EXTRACT_LINES) as u16;
    // title + extract + open hint
    (1 + extract_lines + 1).max(THUMBNAIL_HEIGHT)
}

// ---------------------------------------------------------------------------
// Placeholder
// ---------------------------------------------------------------------------

/// Framed stand-in shown while no thumbnail is available.
struct Placeholder<'a> {
    label: &'a str,
}

impl<'a> Placeholder<'a> {
    fn new(label: &'a str) -> Self {
        Self { label }
    }
}

impl Widget for Placeholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }
        let middle = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        Paragraph::new(self.label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .render(middle, buf);
    }
}

// ---------------------------------------------------------------------------
// Card text
// ---------------------------------------------------------------------------

/// Title, wrapped extract, and the open hint.
///
/// Layout:
///   Title · lang
///   Extract text (may wrap) ...
///   [Enter] open article
pub struct CardText<'a> {
    pub result: &'a SearchResult,
    pub language: Option<Language>,
    pub selected: bool,
}

impl<'a> CardText<'a> {
    pub fn new(result: &'a SearchResult) -> Self {
        Self {
            result,
            language: None,
            selected: false,
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for CardText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let title_style = if self.selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut y = area.y;
        let bottom = area.y + area.height;

        let marker = if self.selected { "\u{25B6} " } else { "" };
        let mut title_spans = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(self.result.title.as_str(), title_style),
        ];
        if let Some(language) = self.language {
            title_spans.push(Span::styled(
                format!(" \u{00B7} {}", language.code()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let title = Line::from(title_spans);
        buf.set_line(area.x, y, &title, area.width);
        y += 1;

        // Reserve the last line for the open hint.
        let max_text_lines = (bottom.saturating_sub(y + 1) as usize).min(MAX_EXTRACT_LINES);
        let lines = wrap_text(&self.result.extract, area.width as usize);
        let truncated = lines.len() > max_text_lines;
        for (i, mut line_text) in lines.into_iter().take(max_text_lines).enumerate() {
            if truncated && i + 1 == max_text_lines {
                line_text.push('\u{2026}');
            }
            buf.set_stringn(area.x, y, &line_text, area.width as usize, Style::default());
            y += 1;
        }

        if y >= bottom {
            return;
        }

        let hint = match self.result.content_url {
            Some(_) => Line::from(vec![
                Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
                Span::styled(" open article", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from(Span::styled(
                "no article link",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        };
        buf.set_line(area.x, bottom - 1, &hint, area.width);
    }
}

/// Greedy word wrap by display width.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.width() + 1 + word.width() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
