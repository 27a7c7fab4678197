use ratatui::{
    layout::Rect,
    style::Stylize,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::cmd::console::state::Focus;

/// Renders the bottom controls bar showing context-aware keybindings
pub(crate) fn render_bottom_bar(frame: &mut Frame, area: Rect, focus: Focus, can_switch_team: bool) {
    let mut spans: Vec<Span> = match focus {
        Focus::List => vec![
            " Quit ".into(),
            "<q> ".blue().bold(),
            " | Navigate ".into(),
            "<↑↓/jk PgDn G> ".blue().bold(),
            " | Search ".into(),
            "</> ".blue().bold(),
            " | Type ".into(),
            "<f/F/a> ".blue().bold(),
            " | Clear search ".into(),
            "<c> ".blue().bold(),
            " | Inspect ".into(),
            "<i> ".blue().bold(),
            " | Reload ".into(),
            "<r> ".blue().bold(),
        ],
        Focus::Search => vec![
            " Type to filter ".into(),
            " | Apply ".into(),
            "<Enter> ".blue().bold(),
            " | Back ".into(),
            "<Esc> ".blue().bold(),
            " | Clear ".into(),
            "<Ctrl-u> ".blue().bold(),
        ],
        Focus::Inspect => vec![
            " Quit ".into(),
            "<q> ".blue().bold(),
            " | Navigate ".into(),
            "<↑↓/jk> ".blue().bold(),
            " | Close ".into(),
            "<i/Esc> ".blue().bold(),
        ],
    };

    if can_switch_team && focus == Focus::List {
        spans.push(" | Team ".into());
        spans.push("<t> ".blue().bold());
    }

    let block = Block::bordered()
        .title(" Controls ")
        .border_set(border::PLAIN);

    let paragraph = Paragraph::new(Line::from(spans)).block(block).left_aligned();

    frame.render_widget(paragraph, area);
}
