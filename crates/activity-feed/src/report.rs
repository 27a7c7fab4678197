use prettytable::{Cell, Row, Table};
use serde::Serialize;
use std::str::FromStr;

use crate::error::Result;
use crate::feed::ActivityFeed;
use crate::render::{render_entry_lenient, RenderedEntry};

/// Output format of a feed report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Table,
    Json,
    JsonPretty,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            "json-pretty" => Ok(Format::JsonPretty),
            other => Err(format!(
                "unknown format {:?}, expected table, json or json-pretty",
                other
            )),
        }
    }
}

/// Serializable snapshot of the feed window.
#[derive(Debug, Serialize)]
pub struct FeedReport {
    pub total: usize,
    pub matching: usize,
    pub shown: usize,
    pub search: String,
    pub type_filter: &'static str,
    pub entries: Vec<RenderedEntry>,
}

impl FeedReport {
    pub fn from_feed(feed: &ActivityFeed) -> Self {
        Self {
            total: feed.backup().len(),
            matching: feed.view_len(),
            shown: feed.shown(),
            search: feed.search().to_string(),
            type_filter: feed.type_selection().label(),
            entries: feed.window_entries().map(render_entry_lenient).collect(),
        }
    }
}

/// Formats the current window of `feed`.
pub fn format_window(feed: &ActivityFeed, format: Format) -> Result<String> {
    let report = FeedReport::from_feed(feed);
    let output = match format {
        Format::Table => render_table(&report),
        Format::Json => serde_json::to_string(&report)?,
        Format::JsonPretty => serde_json::to_string_pretty(&report)?,
    };
    Ok(output)
}

fn render_table(report: &FeedReport) -> String {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("Date"),
        Cell::new("Time"),
        Cell::new("Category"),
        Cell::new("Entry"),
        Cell::new("Go to"),
    ]));

    for entry in &report.entries {
        let target = entry
            .navigation
            .as_ref()
            .map(|target| target.path())
            .unwrap_or_default();
        table.add_row(Row::new(vec![
            Cell::new(&entry.date),
            Cell::new(&entry.time),
            Cell::new(entry.category.unwrap_or("Other")),
            Cell::new(&entry.plain_text()),
            Cell::new(&target),
        ]));
    }

    format!(
        "Showing {} of {} matching ({} total, type: {}, search: {:?})\n{}",
        report.shown, report.matching, report.total, report.type_filter, report.search, table
    )
}
