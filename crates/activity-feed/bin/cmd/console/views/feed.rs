use activity_feed::RenderedEntry;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Cell, HighlightSpacing, Row, Table, TableState},
    Frame,
};

use crate::cmd::console::widgets::formatters::{segment_spans, to_color};

/// Counts shown in the feed panel title
pub(crate) struct FeedCounts {
    pub(crate) shown: usize,
    pub(crate) matching: usize,
    pub(crate) total: usize,
}

/// Renders the window of the feed as a table, one entry per row
pub(crate) fn render_feed_panel(
    entries: &[RenderedEntry],
    counts: FeedCounts,
    title: &str,
    area: Rect,
    frame: &mut Frame,
    table_state: &mut TableState,
    is_focused: bool,
) {
    let border_set = if is_focused {
        border::THICK
    } else {
        border::PLAIN
    };

    let more = if counts.shown < counts.matching {
        " ↓"
    } else {
        ""
    };

    let block = Block::bordered()
        .title(format!(" {} ", title))
        .title_bottom(
            Line::from(format!(
                " [{}/{} of {}]{} ",
                counts.shown, counts.matching, counts.total, more
            ))
            .right_aligned(),
        )
        .border_set(border_set);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    // icon, date, time and go-to columns plus spacing
    let entry_width = (inner_area.width.saturating_sub(2 + 19 + 9 + 6 + 6) as usize).max(20);

    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let header = Row::new(vec!["", "Date", "Time", "Entry", "Go to"])
        .style(header_style)
        .height(1);

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let icon = Cell::from(entry.icon.glyph().to_string())
                .style(Style::default().fg(to_color(entry.color)));

            let mut spans = segment_spans(&entry.description, entry_width);
            let used: usize = spans.iter().map(|span| span.content.chars().count()).sum();
            if !entry.object.is_empty() && used < entry_width {
                if !spans
                    .last()
                    .map(|span| span.content.ends_with(' '))
                    .unwrap_or(true)
                {
                    spans.push(Span::raw(" "));
                }
                spans.extend(segment_spans(
                    &entry.object,
                    entry_width.saturating_sub(used + 1),
                ));
            }

            let go_to = if entry.is_navigable() { "  →" } else { "" };

            let row = Row::new(vec![
                icon,
                Cell::from(entry.date.clone()),
                Cell::from(entry.time.clone()),
                Cell::from(Line::from(spans)),
                Cell::from(go_to),
            ]);

            if index % 2 == 1 {
                row.style(Style::default().bg(Color::Rgb(0x1c, 0x1c, 0x1c)))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(19), // "September 30, 2021"
        Constraint::Length(9),  // "09:15 AM"
        Constraint::Min(20),
        Constraint::Length(6),
    ];

    let selected_row_style = Style::default()
        .add_modifier(Modifier::REVERSED)
        .bg(Color::DarkGray);

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(selected_row_style)
        .highlight_symbol(Text::from(">"))
        .highlight_spacing(HighlightSpacing::Always);

    frame.render_stateful_widget(table, inner_area, table_state);
}
