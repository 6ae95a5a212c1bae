use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::config::DisplayConfig;
use crate::format::{format_kib, truncate_unicode};
use crate::system::process::ProcessSample;
use crate::ui::theme::Theme;

const NAME_WIDTH: u16 = 18;
const USER_WIDTH: u16 = 12;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessSample],
    display: &DisplayConfig,
    theme: &Theme,
) {
    let header_style = Style::default()
        .fg(theme.table_header)
        .add_modifier(Modifier::BOLD);

    let mut titles = vec!["PID", "NAME"];
    let mut widths = vec![Constraint::Length(7), Constraint::Min(NAME_WIDTH)];
    if display.show_process_state {
        titles.push("STATE");
        widths.push(Constraint::Length(5));
    }
    if display.show_process_user {
        titles.push("USER");
        widths.push(Constraint::Length(USER_WIDTH));
    }
    titles.extend(["CPU%", "MEMORY"]);
    widths.extend([Constraint::Length(7), Constraint::Length(10)]);

    let header = Row::new(
        titles
            .into_iter()
            .map(|t| Cell::from(Span::styled(t, header_style))),
    );

    let rows = processes.iter().map(|p| process_row(p, display, theme));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.table_header)),
    );

    frame.render_widget(table, area);
}

fn process_row<'a>(process: &'a ProcessSample, display: &DisplayConfig, theme: &Theme) -> Row<'a> {
    let mut cells = vec![
        Cell::from(format!("{:>7}", process.pid)),
        Cell::from(Span::styled(
            truncate_unicode(&process.name, NAME_WIDTH as usize),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if display.show_process_state {
        cells.push(Cell::from(Span::styled(
            process.state.code().to_string(),
            Style::default().fg(theme.state_color(process.state)),
        )));
    }
    if display.show_process_user {
        cells.push(Cell::from(Span::styled(
            truncate_unicode(&process.user, USER_WIDTH as usize),
            Style::default().fg(theme.user_fg),
        )));
    }
    cells.push(Cell::from(format!("{:>6.1}", process.cpu_percent)));
    cells.push(Cell::from(Span::styled(
        format!("{:>10}", format_kib(process.memory_kb)),
        Style::default().fg(theme.memory_fg),
    )));
    Row::new(cells)
}
