use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::system::filter::SortKey;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sort_key: SortKey,
    reverse_sort: bool,
    update_interval_secs: u64,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit", theme));
    spans.extend(pill_spans("m/c/p/n", "Sort", theme));
    spans.extend(pill_spans("r", "Reverse", theme));
    spans.extend(pill_spans("t", "Net", theme));
    spans.extend(pill_spans("+/-", "Delay", theme));
    spans.extend(pill_spans("h", "Help", theme));

    let direction = if reverse_sort { " (rev)" } else { "" };
    spans.push(Span::styled(
        format!(
            "  Sort: {}{direction} | Update: {update_interval_secs}s",
            sort_key.label()
        ),
        Style::default()
            .fg(theme.pill_desc_fg)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
