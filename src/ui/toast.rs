use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

/// A short notification box anchored to the bottom-right corner of `area`.
pub struct ToastView<'a> {
    text: &'a str,
}

impl<'a> ToastView<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Where the toast lands inside `area`.
    fn panel(&self, area: Rect) -> Rect {
        let max_width = 48u16.min(area.width.saturating_sub(2));
        // +2 for borders, +2 for horizontal padding
        let width = (self.text.width() as u16 + 4).min(max_width);
        let inner_width = width.saturating_sub(4).max(1) as usize;
        let text_lines = self.text.width().div_ceil(inner_width).max(1) as u16;
        let height = (text_lines + 2).min(area.height);

        let x = area.x + area.width.saturating_sub(width + 1);
        let y = area.y + area.height.saturating_sub(height);
        Rect::new(x, y, width, height)
    }
}

impl Widget for ToastView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 6 || area.height < 3 {
            return;
        }
        let panel = self.panel(area);

        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let text_area = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        Paragraph::new(self.text)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
    }
}
