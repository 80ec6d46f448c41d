use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// A simple single-line text input renderer.
///
/// Renders the prompt + text content, with a cursor indicator at the end
/// while focused.
pub struct TextInput<'a> {
    pub prompt: &'a str,
    pub text: &'a str,
    pub style: Style,
    pub focused: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(prompt: &'a str, text: &'a str) -> Self {
        Self {
            prompt,
            text,
            style: Style::default().fg(Color::White),
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let cursor = if self.focused { "\u{2588}" } else { "" };
        let display = format!("{}{}{cursor}", self.prompt, self.text);
        let visible = tail_fitting(&display, area.width as usize);

        buf.set_string(area.x, area.y, visible, self.style);
    }
}

/// The longest suffix of `s` whose display width fits in `max_width` columns.
fn tail_fitting(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in s.char_indices().rev() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            return &s[idx + ch.len_utf8()..];
        }
    }
    s
}
