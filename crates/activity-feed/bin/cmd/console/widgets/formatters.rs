use activity_feed::{Rgb, Segment, SegmentStyle};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Styled spans for rendered entry segments, truncated to `max_len` chars.
pub(crate) fn segment_spans(segments: &[Segment], max_len: usize) -> Vec<Span<'static>> {
    let mut remaining = max_len;
    let mut spans = Vec::with_capacity(segments.len());

    for segment in segments {
        if remaining == 0 {
            break;
        }
        let text = truncate_message(&segment.text, remaining);
        remaining = remaining.saturating_sub(text.chars().count());
        spans.push(Span::styled(text, segment_style(segment.style)));
    }

    spans
}

pub(crate) fn segment_style(style: SegmentStyle) -> Style {
    match style {
        SegmentStyle::Plain => Style::default(),
        SegmentStyle::Highlight => Style::default()
            .fg(Color::Rgb(0x2b, 0x96, 0x51))
            .add_modifier(Modifier::BOLD),
        SegmentStyle::Object => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// Cuts `msg` to at most `max_len` chars, marking the cut with `...`.
pub(crate) fn truncate_message(msg: &str, max_len: usize) -> String {
    if msg.chars().count() <= max_len {
        msg.to_string()
    } else {
        let truncated: String = msg.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

pub(crate) fn spinner_frame(tick: usize) -> char {
    SPINNER[tick % SPINNER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message_counts_chars() {
        assert_eq!(truncate_message("short", 10), "short");
        assert_eq!(truncate_message("Completed Sprint Alpha", 12), "Completed...");
        assert_eq!(truncate_message("żółć żółć", 6), "żół...");
    }

    #[test]
    fn test_segment_spans_respect_budget() {
        let segments = vec![
            Segment {
                text: "Completed ".to_string(),
                style: SegmentStyle::Plain,
            },
            Segment {
                text: "Sprint Alpha".to_string(),
                style: SegmentStyle::Highlight,
            },
        ];
        let spans = segment_spans(&segments, 14);
        let text: String = spans.iter().map(|span| span.content.to_string()).collect();
        assert_eq!(text, "Completed S...");
        assert_eq!(spans[1].style, segment_style(SegmentStyle::Highlight));
    }
}
