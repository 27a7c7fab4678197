use activity_feed::RenderedEntry;
use ratatui::{
    layout::Rect,
    style::Stylize,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::cmd::console::widgets::formatters::{segment_style, to_color};

/// Renders a centered popup with the full entry and where it leads
pub(crate) fn render_inspect_popup(entry: &RenderedEntry, area: Rect, frame: &mut Frame) {
    // Center the popup at 70% of screen size
    let popup_width = (area.width as f32 * 0.7) as u16;
    let popup_height = (area.height as f32 * 0.6) as u16;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(format!(" Log {} ", entry.id))
        .border_set(border::DOUBLE);

    let styled = |segments: &[activity_feed::Segment]| -> Line<'static> {
        Line::from(
            segments
                .iter()
                .map(|segment| Span::styled(segment.text.clone(), segment_style(segment.style)))
                .collect::<Vec<_>>(),
        )
    };

    let category = Span::styled(
        format!("{} {}", entry.icon.glyph(), entry.category.unwrap_or("Other")),
        ratatui::style::Style::default().fg(to_color(entry.color)),
    );

    let target = match &entry.navigation {
        Some(target) => Line::from(vec!["Go to ".into(), target.path().blue().underlined()]),
        None => Line::from("Not navigable".dark_gray()),
    };

    let mut lines = vec![
        Line::from(category),
        Line::from(format!("{} {}", entry.date, entry.time)).dark_gray(),
        Line::from(""),
        styled(&entry.description),
    ];
    if !entry.object.is_empty() {
        lines.push(styled(&entry.object));
    }
    lines.push(Line::from(""));
    lines.push(target);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
