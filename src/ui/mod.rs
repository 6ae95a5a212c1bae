pub mod header;
pub mod help;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{App, HELP_ENTRIES};

pub fn draw(frame: &mut Frame, app: &App) {
    let show_network = app.show_network();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::height(&app.snapshot, show_network)),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        &app.display,
        show_network,
        &app.theme,
    );
    process_table::render(
        frame,
        chunks[1],
        &app.snapshot.processes,
        &app.display,
        &app.theme,
    );
    statusbar::render(
        frame,
        chunks[2],
        app.sort_key(),
        app.reverse_sort(),
        app.update_interval_secs(),
        &app.theme,
    );

    // drawn last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), &HELP_ENTRIES, &app.theme);
    }
}
