//! Wire records returned by `GET /logs` and the normalized entries the feed works with.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

use crate::category::Category;

/// Display format of the date column, e.g. `March 04, 2020`.
pub const DATE_FORMAT: &str = "%B %d, %Y";
/// Display format of the time column, e.g. `09:15 AM`.
pub const TIME_FORMAT: &str = "%I:%M %p";
/// Shown in place of the date and time of a record whose date is unreadable.
pub const INVALID_DATE: &str = "Invalid date";

/// Identifier of a log record. The backend emits either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Int(id) => write!(f, "{}", id),
            EntryId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        EntryId::Int(id)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId::Str(id.to_string())
    }
}

/// A log record exactly as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLogRecord {
    pub id: EntryId,
    #[serde(rename = "type")]
    pub kind: u32,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub object: String,
    #[serde(default)]
    pub issue_id: Option<EntryId>,
    /// Timestamp text. Numeric epoch milliseconds are kept as their digits.
    #[serde(deserialize_with = "string_or_millis")]
    pub date: String,
}

fn string_or_millis<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireDate {
        Millis(i64),
        Text(String),
    }

    Ok(match WireDate::deserialize(deserializer)? {
        WireDate::Millis(ms) => ms.to_string(),
        WireDate::Text(text) => text,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A normalized activity log entry. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: EntryId,
    #[serde(rename = "type")]
    pub kind: u32,
    pub description: String,
    pub object: String,
    pub issue_id: Option<EntryId>,
    /// `None` when the wire date could not be read.
    pub timestamp: Option<DateTime<Utc>>,
    pub date: String,
    pub time: String,
}

impl LogEntry {
    /// Normalizes a wire record, reading and formatting times in the local timezone.
    pub fn from_raw(raw: RawLogRecord) -> Self {
        Self::from_raw_in(raw, &Local)
    }

    /// Normalizes a wire record, reading zone-less dates and formatting date
    /// and time in `tz`. An unreadable date keeps the entry with
    /// [`INVALID_DATE`] in both columns.
    pub fn from_raw_in<Tz>(raw: RawLogRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let timestamp = parse_timestamp_in(&raw.date, tz);
        let (date, time) = match timestamp {
            Some(timestamp) => {
                let local = timestamp.with_timezone(tz);
                (
                    local.format(DATE_FORMAT).to_string(),
                    local.format(TIME_FORMAT).to_string(),
                )
            }
            None => {
                warn!(id = %raw.id, date = %raw.date, "log has an unreadable date");
                (INVALID_DATE.to_string(), INVALID_DATE.to_string())
            }
        };

        Self {
            id: raw.id,
            kind: raw.kind,
            description: raw.description,
            object: raw.object,
            issue_id: raw.issue_id,
            timestamp,
            date,
            time,
        }
    }

    /// The known category of this entry, `None` for codes past the table.
    pub fn category(&self) -> Option<Category> {
        Category::from_code(self.kind)
    }
}

/// Normalizes records in fetch order into most-recent-first entries.
pub fn normalize(records: Vec<RawLogRecord>) -> Vec<LogEntry> {
    normalize_in(records, &Local)
}

pub fn normalize_in<Tz>(records: Vec<RawLogRecord>, tz: &Tz) -> Vec<LogEntry>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    records
        .into_iter()
        .rev()
        .map(|raw| LogEntry::from_raw_in(raw, tz))
        .collect()
}

/// Like [`parse_timestamp_in`] in the local timezone.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(value, &Local)
}

/// Reads a wire date. Accepted forms:
///
/// * RFC 3339, with its own offset
/// * `YYYY-MM-DD HH:MM:SS[.fff]` (or with a `T`), read in `tz`
/// * `YYYY-MM-DD`, read as UTC midnight
/// * integer epoch milliseconds
pub fn parse_timestamp_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(naive) = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn raw(id: i64, date: &str) -> RawLogRecord {
        RawLogRecord {
            id: EntryId::Int(id),
            kind: 0,
            description: "created issue".to_string(),
            object: "Fix login".to_string(),
            issue_id: Some(EntryId::Int(7)),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_formats_date_and_time_once() {
        let entry = LogEntry::from_raw_in(raw(1, "2020-03-04T21:05:00Z"), &Utc);
        assert_eq!(entry.date, "March 04, 2020");
        assert_eq!(entry.time, "09:05 PM");
    }

    #[test]
    fn test_accepts_sql_style_timestamps() {
        let parsed = parse_timestamp_in("2020-03-04 08:30:12", &Utc).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2020-03-04T08:30:12+00:00");
        assert!(parse_timestamp_in("2020-03-04 08:30:12.250", &Utc).is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_zoneless_timestamps_are_read_in_the_given_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let parsed = parse_timestamp_in("2020-03-04 08:30:00", &tz).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2020-03-04T06:30:00+00:00");

        let entry = LogEntry::from_raw_in(raw(1, "2020-03-04 08:30:00"), &tz);
        assert_eq!(entry.time, "08:30 AM");
    }

    #[test]
    fn test_accepts_date_only_and_epoch_millis() {
        let date_only = parse_timestamp_in("2021-06-01", &Utc).unwrap();
        assert_eq!(date_only.to_rfc3339(), "2021-06-01T00:00:00+00:00");

        let millis = parse_timestamp_in("1622538000000", &Utc).unwrap();
        assert_eq!(millis.to_rfc3339(), "2021-06-01T09:00:00+00:00");
    }

    #[test]
    fn test_unreadable_date_keeps_the_entry() {
        let entry = LogEntry::from_raw_in(raw(9, "not a date"), &Utc);
        assert_eq!(entry.id, EntryId::Int(9));
        assert_eq!(entry.timestamp, None);
        assert_eq!(entry.date, INVALID_DATE);
        assert_eq!(entry.time, INVALID_DATE);
    }

    #[test]
    fn test_mixed_batch_normalizes_every_record() {
        let mut records: Vec<RawLogRecord> = (0..99)
            .map(|i| raw(i, "2021-06-01 09:00:00"))
            .collect();
        records.push(raw(99, "garbage"));
        records.push(raw(100, "2021-06-01"));

        let entries = normalize_in(records, &Utc);
        assert_eq!(entries.len(), 101);
        assert_eq!(entries[0].date, "June 01, 2021");
        assert_eq!(entries[1].date, INVALID_DATE);
        assert!(entries[2..].iter().all(|entry| entry.timestamp.is_some()));
    }

    #[test]
    fn test_decodes_numeric_date() {
        let json = r#"{"id":5,"type":0,"description":"created issue","object":"x","date":1622538000000}"#;
        let record: RawLogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, "1622538000000");

        let entry = LogEntry::from_raw_in(record, &Utc);
        assert_eq!(entry.time, "09:00 AM");
    }

    #[test]
    fn test_entry_serializes_with_timestamp() {
        let entry = LogEntry::from_raw_in(raw(3, "2020-03-04T21:05:00Z"), &Utc);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], 0);
        assert_eq!(value["timestamp"], "2020-03-04T21:05:00Z");
        assert_eq!(value["date"], "March 04, 2020");

        let invalid = LogEntry::from_raw_in(raw(4, "soon"), &Utc);
        let value = serde_json::to_value(&invalid).unwrap();
        assert!(value["timestamp"].is_null());
    }

    #[test]
    fn test_normalize_reverses_fetch_order() {
        let records = vec![
            raw(1, "2020-01-01T00:00:00Z"),
            raw(2, "2020-01-02T00:00:00Z"),
            raw(3, "2020-01-03T00:00:00Z"),
        ];
        let ids: Vec<EntryId> = normalize_in(records, &Utc)
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec![EntryId::Int(3), EntryId::Int(2), EntryId::Int(1)]);
    }

    #[test]
    fn test_decodes_wire_record() {
        let json = r#"{"id":"a1","type":4,"description":"edited notes","object":null,"date":"2020-01-01 10:00:00"}"#;
        let record: RawLogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, EntryId::Str("a1".to_string()));
        assert_eq!(record.kind, 4);
        assert_eq!(record.object, "");
        assert_eq!(record.issue_id, None);
    }

    #[test]
    fn test_negative_type_is_rejected() {
        let json = r#"{"id":1,"type":-1,"description":"x","object":"y","date":"2020-01-01 10:00:00"}"#;
        assert!(serde_json::from_str::<RawLogRecord>(json).is_err());
    }
}
