use activity_feed::TypeSelection;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Renders the search input and the type selector side by side
pub(crate) fn render_filters_bar(
    frame: &mut Frame,
    area: Rect,
    search_input: &str,
    search_focused: bool,
    search_pending: bool,
    selection: TypeSelection,
    disabled: bool,
) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)])
        .split(area);

    let dimmed = if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let search_block = Block::bordered()
        .title(if search_pending { " Search … " } else { " Search " })
        .border_set(if search_focused {
            border::THICK
        } else {
            border::PLAIN
        })
        .style(dimmed);

    let search_line = if search_input.is_empty() && !search_focused {
        Line::from("Filter logs by date or description text </>".dark_gray())
    } else if search_focused {
        Line::from(vec![Span::raw(search_input.to_string()), "▏".blue()])
    } else {
        Line::from(search_input.to_string())
    };

    frame.render_widget(Paragraph::new(search_line).block(search_block), chunks[0]);

    let type_block = Block::bordered()
        .title(format!(" Type [{}/{}] ", selection.ui_value(), TypeSelection::OPTIONS - 1))
        .border_set(border::PLAIN)
        .style(dimmed);

    let type_line = Line::from(vec![
        "◀ ".blue().bold(),
        Span::raw(selection.label()),
        " ▶".blue().bold(),
    ])
    .centered();

    frame.render_widget(Paragraph::new(type_line).block(type_block), chunks[1]);
}
