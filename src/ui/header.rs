use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::config::DisplayConfig;
use crate::format::{format_bytes, format_kib};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

/// Rows needed by [`render`] for the given snapshot.
pub fn height(snapshot: &SystemSnapshot, show_network: bool) -> u16 {
    let network = u16::from(show_network && !snapshot.network_interfaces.is_empty());
    3 + 1 + network
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    display: &DisplayConfig,
    show_network: bool,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_cpu(frame, gauges[0], snapshot, display.show_cpu_bar, theme);
    render_memory(frame, gauges[1], snapshot, display.show_memory_bar, theme);
    render_summary(frame, rows[1], snapshot, display.show_load_avg, theme);

    if show_network && !snapshot.network_interfaces.is_empty() {
        render_network(frame, rows[2], snapshot, theme);
    }
}

fn titled_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_percent(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    percent: f64,
    label: String,
    as_bar: bool,
    theme: &Theme,
) {
    if as_bar {
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(
                Style::default()
                    .fg(theme.gauge_filled)
                    .bg(theme.gauge_unfilled),
            )
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, area);
    } else {
        let text = Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(theme.text_primary),
        )))
        .block(block);
        frame.render_widget(text, area);
    }
}

fn render_cpu(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    as_bar: bool,
    theme: &Theme,
) {
    render_percent(
        frame,
        area,
        titled_block(" CPU ", theme),
        snapshot.cpu_percent,
        format!("{:.1}%", snapshot.cpu_percent),
        as_bar,
        theme,
    );
}

fn render_memory(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    as_bar: bool,
    theme: &Theme,
) {
    let percent = snapshot.memory_percent();
    render_percent(
        frame,
        area,
        titled_block(" MEM ", theme),
        percent,
        format!(
            "{:.1}% ({}/{})",
            percent,
            format_kib(snapshot.memory_used_kb),
            format_kib(snapshot.memory_total_kb)
        ),
        as_bar,
        theme,
    );
}

fn render_summary(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    show_load_avg: bool,
    theme: &Theme,
) {
    let label = Style::default()
        .fg(theme.text_secondary)
        .add_modifier(Modifier::BOLD);
    let value = Style::default()
        .fg(theme.load_fg)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(
        " mtop ",
        Style::default()
            .fg(theme.header_accent_fg)
            .bg(theme.header_accent_bg)
            .add_modifier(Modifier::BOLD),
    )];
    if show_load_avg {
        let [one, five, fifteen] = snapshot.load_average;
        spans.extend([
            Span::styled("  Load: ", label),
            Span::styled(format!("{one:.2} {five:.2} {fifteen:.2}"), value),
        ]);
    }
    spans.extend([
        Span::styled("  Processes: ", label),
        Span::styled(snapshot.process_count.to_string(), value),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_network(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let mut spans = vec![Span::styled(
        " Network: ",
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, net) in snapshot.network_interfaces.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(
            format!(
                "{} RX:{} TX:{}",
                net.name,
                format_bytes(net.rx_bytes),
                format_bytes(net.tx_bytes)
            ),
            Style::default().fg(theme.network_fg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
