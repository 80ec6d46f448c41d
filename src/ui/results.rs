use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::card::{card_height, render_card};

/// The scrollable card list, newest first, with selection highlight.
pub fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match app.cards.len() {
        0 => " Results ".to_string(),
        1 => " Results (1) ".to_string(),
        n => format!(" Results ({n}) "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.cards.is_empty() {
        let msg = if app.is_loading() {
            "Loading..."
        } else {
            "Type a title and press Enter to search"
        };
        frame.render_widget(
            Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
            Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), inner.height.min(1)),
        );
        return;
    }

    let content_width = inner.width.saturating_sub(1); // 1 char left margin
    let available_height = inner.height;

    // Pre-compute heights for each card (including separator).
    let heights: Vec<u16> = app
        .cards
        .iter()
        .map(|c| card_height(&c.result, content_width) + 1)
        .collect();

    let selected_index = app.selected_index.min(app.cards.len() - 1);
    let scroll_start = compute_scroll_start(&heights, selected_index, available_height);

    let bottom = inner.y + inner.height;
    let mut y = inner.y;
    let mut idx = scroll_start;
    while idx < app.cards.len() && y < bottom {
        let card_h = heights[idx];
        let render_h = card_h.min(bottom - y);

        let card_area = Rect::new(inner.x + 1, y, content_width, render_h.saturating_sub(1));
        render_card(frame, &mut app.cards[idx], idx == selected_index, card_area);

        y += render_h;

        // Draw separator line
        if y < bottom && idx + 1 < app.cards.len() {
            let sep = "\u{2500}".repeat(content_width as usize);
            frame.buffer_mut().set_string(
                inner.x + 1,
                y.saturating_sub(1),
                &sep,
                Style::default().fg(Color::DarkGray),
            );
        }

        idx += 1;
    }
}

/// Find the smallest scroll start index so that the selected item fits
/// within the available height.
fn compute_scroll_start(heights: &[u16], selected: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }

    let selected = selected.min(heights.len() - 1);
    if available == 0 {
        return selected;
    }

    // Build a viewport that always includes the selected card and packs as
    // many previous items as can fit above it.
    let mut start = selected;
    let mut used = heights[selected];

    while start > 0 {
        let next = used.saturating_add(heights[start - 1]);
        if next > available {
            break;
        }
        start -= 1;
        used = next;
    }

    start
}

#[cfg(test)]
mod tests {
    use super::compute_scroll_start;

    #[test]
    fn handles_empty_list() {
        assert_eq!(compute_scroll_start(&[], 0, 10), 0);
    }

    #[test]
    fn advances_when_selected_is_below_exactly_full_window() {
        let heights = [5, 5, 5];
        assert_eq!(compute_scroll_start(&heights, 2, 10), 1);
    }

    #[test]
    fn keeps_selected_item_visible_when_it_is_taller_than_viewport() {
        let heights = [3, 12, 4];
        assert_eq!(compute_scroll_start(&heights, 1, 8), 1);
    }

    #[test]
    fn clamps_selected_index_to_last_item() {
        let heights = [2, 2, 2];
        assert_eq!(compute_scroll_start(&heights, 99, 4), 1);
    }
}
