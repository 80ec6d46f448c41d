pub mod card;
pub mod command_bar;
pub mod help;
pub mod input;
pub mod results;
pub mod search_bar;
pub mod status_bar;
pub mod toast;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::{App, AppMode};
use crate::event::ViewKind;

use command_bar::CommandBar;
use help::HelpView;
use search_bar::SearchBar;
use status_bar::StatusBar;
use toast::ToastView;

/// Height of the search bar, borders included.
const SEARCH_BAR_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: search bar + results + status bar + optional command bar
    let bottom_height = if app.mode == AppMode::Command { 2 } else { 1 };

    let [search_area, main_area, bottom_area] = Layout::vertical([
        Constraint::Length(SEARCH_BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(bottom_height),
    ])
    .areas(area);

    frame.render_widget(SearchBar::new(app), search_area);

    if app.mode == AppMode::Command {
        let [status_area, cmd_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(bottom_area);
        frame.render_widget(StatusBar::new(app), status_area);
        frame.render_widget(CommandBar::new(&app.command_input), cmd_area);
    } else {
        frame.render_widget(StatusBar::new(app), bottom_area);
    }

    results::render_results(frame, app, main_area);

    if app.current_view() == Some(&ViewKind::Help) {
        frame.render_widget(HelpView::new(), main_area);
    }

    // Toasts sit on top of everything, just above the status bar.
    if let Some(ref toast) = app.toast {
        frame.render_widget(ToastView::new(&toast.message), main_area);
    }
}
