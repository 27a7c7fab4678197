use activity_feed::{ActivityFeed, LoadState, RenderedEntry};
use ratatui::{
    layout::Rect,
    style::Stylize,
    symbols::border,
    text::Line,
    widgets::{Block, Paragraph, TableState},
    Frame,
};

use crate::cmd::console::state::Focus;
use crate::cmd::console::widgets::formatters::spinner_frame;

use super::feed::{render_feed_panel, FeedCounts};
use super::inspect::render_inspect_popup;

/// Renders the feed area including loading, error and empty states
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_main_view(
    frame: &mut Frame,
    area: Rect,
    feed: &ActivityFeed,
    rendered: &[RenderedEntry],
    title: &str,
    source_label: &str,
    table_state: &mut TableState,
    focus: Focus,
    inspected: Option<&RenderedEntry>,
    tick: usize,
) {
    match feed.state() {
        LoadState::Loading => {
            let loading_text = vec![
                Line::from(""),
                Line::from(format!("{} Loading project logs", spinner_frame(tick)))
                    .blue()
                    .bold()
                    .centered(),
                Line::from(""),
                Line::from(source_label.to_string()).dark_gray().centered(),
            ];

            let block = Block::bordered()
                .title(format!(" {} ", title))
                .border_set(border::THICK);
            frame.render_widget(Paragraph::new(loading_text).block(block), area);
            return;
        }
        LoadState::Failed(e) => {
            let error_text = vec![
                Line::from(""),
                Line::from("Error").red().bold().centered(),
                Line::from(""),
                Line::from(e.to_string()).red().centered(),
                Line::from(""),
                Line::from(format!("Press <r> to retry loading {}", source_label))
                    .yellow()
                    .centered(),
            ];

            let block = Block::bordered()
                .title(format!(" {} ", title))
                .border_set(border::THICK);
            frame.render_widget(Paragraph::new(error_text).block(block), area);
            return;
        }
        LoadState::Ready => {}
    }

    if feed.view_len() == 0 {
        let message = if feed.backup().is_empty() {
            "No activity recorded for this team yet"
        } else {
            "No logs match the current filters"
        };
        let empty_text = vec![
            Line::from(""),
            Line::from(message).yellow().centered(),
        ];

        let block = Block::bordered()
            .title(format!(" {} ", title))
            .border_set(border::THICK);
        frame.render_widget(Paragraph::new(empty_text).block(block), area);
        return;
    }

    render_feed_panel(
        rendered,
        FeedCounts {
            shown: feed.shown(),
            matching: feed.view_len(),
            total: feed.backup().len(),
        },
        title,
        area,
        frame,
        table_state,
        focus == Focus::List,
    );

    if focus == Focus::Inspect {
        if let Some(entry) = inspected {
            render_inspect_popup(entry, area, frame);
        }
    }
}
