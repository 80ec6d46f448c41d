use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::ui::input::TextInput;

/// Command input bar rendered at the bottom while in command mode.
pub struct CommandBar<'a> {
    pub input: &'a str,
}

impl<'a> CommandBar<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        TextInput::new(":", self.input).render(area, buf);
    }
}
