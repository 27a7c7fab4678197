//! Turns a [`LogEntry`] into styled text segments, independent of any UI toolkit.

use serde::{Deserialize, Serialize};

use crate::category::{Category, Icon, NavTarget, Presentation, Rgb};
use crate::entry::{EntryId, LogEntry};
use crate::error::{FeedError, Result};

/// Word of a sprint-completion description replaced by the sprint name.
pub const SPRINT_PLACEHOLDER: &str = "$Sprint$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStyle {
    Plain,
    /// Inline emphasis, used for the sprint name.
    Highlight,
    /// The object an entry refers to (issue title, member name, ...).
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

impl Segment {
    fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Everything a view needs to draw one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEntry {
    pub id: EntryId,
    pub date: String,
    pub time: String,
    pub category: Option<&'static str>,
    pub icon: Icon,
    pub color: Rgb,
    pub description: Vec<Segment>,
    pub object: Vec<Segment>,
    pub navigation: Option<NavTarget>,
}

impl RenderedEntry {
    pub fn description_text(&self) -> String {
        join(&self.description)
    }

    pub fn object_text(&self) -> String {
        join(&self.object)
    }

    /// Description followed by the object, as one line of plain text.
    pub fn plain_text(&self) -> String {
        let description = self.description_text();
        let object = self.object_text();
        if object.is_empty() {
            description
        } else if description.is_empty() || description.ends_with(char::is_whitespace) {
            format!("{}{}", description, object)
        } else {
            format!("{} {}", description, object)
        }
    }

    pub fn is_navigable(&self) -> bool {
        self.navigation.is_some()
    }
}

fn join(segments: &[Segment]) -> String {
    segments.iter().map(|segment| segment.text.as_str()).collect()
}

#[derive(Debug, Deserialize)]
struct SprintSummary {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    issues: Vec<String>,
}

/// Renders one entry. Fails only for a sprint-completion entry whose object
/// is not valid sprint JSON.
pub fn render_entry(entry: &LogEntry) -> Result<RenderedEntry> {
    let category = entry.category();
    let presentation = Presentation::for_code(entry.kind);

    let (description, object) = match category {
        Some(Category::SprintCompleted) => {
            let sprint: SprintSummary =
                serde_json::from_str(&entry.object).map_err(|source| FeedError::SprintObject {
                    id: entry.id.clone(),
                    source,
                })?;
            (
                sprint_description(&entry.description, sprint.name.as_deref()),
                sprint_issues(&sprint.issues),
            )
        }
        _ => plain_parts(entry),
    };

    Ok(RenderedEntry {
        id: entry.id.clone(),
        date: entry.date.clone(),
        time: entry.time.clone(),
        category: category.map(Category::label),
        icon: presentation.icon,
        color: presentation.color,
        description,
        object,
        navigation: category.and_then(|category| category.navigation(entry.issue_id.as_ref())),
    })
}

/// Like [`render_entry`], but falls back to the raw description and object
/// instead of failing.
pub fn render_entry_lenient(entry: &LogEntry) -> RenderedEntry {
    match render_entry(entry) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::warn!(error = %e, "rendering entry as raw text");
            let presentation = Presentation::for_code(entry.kind);
            let (description, object) = plain_parts(entry);
            RenderedEntry {
                id: entry.id.clone(),
                date: entry.date.clone(),
                time: entry.time.clone(),
                category: entry.category().map(Category::label),
                icon: presentation.icon,
                color: presentation.color,
                description,
                object,
                navigation: None,
            }
        }
    }
}

fn plain_parts(entry: &LogEntry) -> (Vec<Segment>, Vec<Segment>) {
    let description = vec![Segment::new(entry.description.as_str(), SegmentStyle::Plain)];
    let object = if entry.object.is_empty() {
        Vec::new()
    } else {
        vec![Segment::new(entry.object.as_str(), SegmentStyle::Object)]
    };
    (description, object)
}

fn sprint_description(description: &str, name: Option<&str>) -> Vec<Segment> {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return vec![Segment::new(description, SegmentStyle::Plain)],
    };

    let mut segments = Vec::new();
    let mut plain = String::new();
    for (index, word) in description.split(' ').enumerate() {
        if index > 0 {
            plain.push(' ');
        }
        if word == SPRINT_PLACEHOLDER {
            if !plain.is_empty() {
                segments.push(Segment::new(std::mem::take(&mut plain), SegmentStyle::Plain));
            }
            segments.push(Segment::new(
                format!("Sprint {}", name),
                SegmentStyle::Highlight,
            ));
        } else {
            plain.push_str(word);
        }
    }
    if !plain.is_empty() {
        segments.push(Segment::new(plain, SegmentStyle::Plain));
    }
    segments
}

fn sprint_issues(issues: &[String]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(issues.len() * 2);
    for (index, issue) in issues.iter().enumerate() {
        if index > 0 {
            segments.push(Segment::new(", ", SegmentStyle::Plain));
        }
        segments.push(Segment::new(issue.as_str(), SegmentStyle::Object));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(kind: u32, description: &str, object: &str, issue_id: Option<i64>) -> LogEntry {
        LogEntry {
            id: EntryId::Int(1),
            kind,
            description: description.to_string(),
            object: object.to_string(),
            issue_id: issue_id.map(EntryId::Int),
            timestamp: Some(chrono::Utc.with_ymd_and_hms(2021, 6, 1, 9, 0, 0).unwrap()),
            date: "June 01, 2021".to_string(),
            time: "09:00 AM".to_string(),
        }
    }

    #[test]
    fn test_sprint_completion_is_expanded() {
        let item = entry(
            13,
            "Completed $Sprint$ with 2 issues",
            r#"{"name":"Alpha","issues":["Fix login","Update docs"]}"#,
            None,
        );
        let rendered = render_entry(&item).unwrap();

        assert_eq!(rendered.description_text(), "Completed Sprint Alpha with 2 issues");
        assert_eq!(
            rendered.description[1],
            Segment::new("Sprint Alpha", SegmentStyle::Highlight)
        );
        assert_eq!(rendered.object_text(), "Fix login, Update docs");
        assert_eq!(
            rendered
                .object
                .iter()
                .filter(|s| s.style == SegmentStyle::Object)
                .count(),
            2
        );
        assert!(!rendered.is_navigable());
    }

    #[test]
    fn test_sprint_without_name_keeps_description() {
        let item = entry(13, "Completed $Sprint$", r#"{"name":"","issues":[]}"#, None);
        let rendered = render_entry(&item).unwrap();
        assert_eq!(rendered.description_text(), "Completed $Sprint$");
        assert!(rendered.object.is_empty());
    }

    #[test]
    fn test_malformed_sprint_object_is_an_error() {
        let item = entry(13, "Completed $Sprint$", "Alpha", None);
        assert!(matches!(
            render_entry(&item),
            Err(FeedError::SprintObject { .. })
        ));

        let lenient = render_entry_lenient(&item);
        assert_eq!(lenient.plain_text(), "Completed $Sprint$ Alpha");
    }

    #[test]
    fn test_deleted_issue_never_navigates() {
        let rendered = render_entry(&entry(2, "deleted issue", "Old bug", Some(5))).unwrap();
        assert_eq!(rendered.navigation, None);
        assert_eq!(rendered.category, Some("Issues deleted"));
    }

    #[test]
    fn test_plain_entry_links_to_issue() {
        let rendered = render_entry(&entry(0, "created issue", "Login page", Some(5))).unwrap();
        assert_eq!(rendered.plain_text(), "created issue Login page");
        assert_eq!(
            rendered.navigation.map(|target| target.path()),
            Some("/dashboard/issue/5".to_string())
        );
    }

    #[test]
    fn test_unknown_code_uses_fallback() {
        let rendered = render_entry(&entry(40, "did something", "", None)).unwrap();
        assert_eq!(rendered.icon, Icon::Pushpin);
        assert_eq!(rendered.color.to_string(), "#a7a4a4");
        assert_eq!(rendered.category, None);
        assert_eq!(rendered.navigation, None);
    }
}
