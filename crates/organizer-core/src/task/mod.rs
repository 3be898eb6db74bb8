//! Task records as fetched from the task store.
//!
//! Records arrive loosely typed: the duration may be a number, a numeric
//! string or garbage, completion may be a flag or a progress fraction, and
//! the due date may be a bare date or a full timestamp. This module keeps the
//! raw values intact and exposes typed views over them, so nothing downstream
//! needs to mutate a record to normalize it.

pub mod completion;
pub mod hours;

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use completion::{Completion, CompletionValue, PROGRESS_STEP};
pub use hours::{Hours, ParsedHours};

/// Opaque task identifier.
///
/// Stores hand out both numeric and string keys; both are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
            Other(serde_json::Value),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TaskId(s),
            RawId::Int(n) => TaskId(n.to_string()),
            RawId::Float(n) => TaskId(n.to_string()),
            RawId::Other(serde_json::Value::Null) => TaskId::default(),
            RawId::Other(other) => TaskId(other.to_string()),
        })
    }
}

/// A task as delivered by the persistence layer.
///
/// Only the fields the scheduler reads are modelled; anything else in the
/// source row is ignored on deserialization. A null or wrongly typed field
/// falls back to its empty value so one bad row cannot reject a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: TaskId,
    #[serde(default, deserialize_with = "lenient_name")]
    pub task_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// ISO-8601 date or date-time. Kept raw; see [`TaskRecord::due`].
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: Option<String>,
    /// Estimated hours to complete.
    #[serde(default)]
    pub time_to_take: Hours,
    #[serde(default)]
    pub is_completed: CompletionValue,
}

impl TaskRecord {
    /// Create a record with a due date and no duration or progress.
    pub fn new(
        id: impl Into<String>,
        task_name: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(id),
            task_name: task_name.into(),
            description: None,
            due_date: Some(due_date.into()),
            time_to_take: Hours::Missing,
            is_completed: CompletionValue::Missing,
        }
    }

    pub fn with_hours(mut self, hours: Hours) -> Self {
        self.time_to_take = hours;
        self
    }

    pub fn with_completion(mut self, completion: CompletionValue) -> Self {
        self.is_completed = completion;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parsed due date, or `None` when absent or malformed.
    pub fn due(&self) -> Option<DateTime<FixedOffset>> {
        self.due_date.as_deref().and_then(parse_due_date)
    }

    /// Canonical completion fraction.
    pub fn completion(&self) -> Completion {
        self.is_completed.canonical()
    }
}

/// Parse a due date in any of the shapes the task store emits.
///
/// Accepts RFC 3339 timestamps, offset-less date-times (read as UTC) and
/// bare `YYYY-MM-DD` dates (midnight UTC). The returned value keeps the
/// original offset so its calendar date matches the date written in the
/// string.
pub fn parse_due_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }

    // Store timestamps with a space separator and an offset ("+00:00").
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().with_timezone(&utc))
}

/// Parse a user-supplied reference instant (`--now` style arguments).
///
/// Same shapes as [`parse_due_date`], normalized to UTC.
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    parse_due_date(input).map(|dt| dt.with_timezone(&Utc))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn deserializes_store_row() {
        let json = r#"{
            "id": 42,
            "task_name": "Essay",
            "description": null,
            "due_date": "2024-05-01T00:00:00+00:00",
            "time_to_take": "2.5",
            "is_completed": false,
            "user_id": "abc"
        }"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "42");
        assert_eq!(task.task_name, "Essay");
        assert_eq!(task.time_to_take, Hours::Text("2.5".into()));
        assert_eq!(task.completion(), Completion::NONE);
        assert_eq!(task.due().unwrap().day(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let task: TaskRecord = serde_json::from_str(r#"{"id": "t1"}"#).unwrap();
        assert!(task.due_date.is_none());
        assert_eq!(task.time_to_take, Hours::Missing);
        assert_eq!(task.is_completed, CompletionValue::Missing);
        assert!(task.due().is_none());
    }

    #[test]
    fn non_string_due_date_is_treated_as_missing() {
        let task: TaskRecord = serde_json::from_str(r#"{"id": "t1", "due_date": 17}"#).unwrap();
        assert!(task.due_date.is_none());
    }

    #[test]
    fn null_and_mistyped_text_fields_fall_back_to_empty() {
        let task: TaskRecord = serde_json::from_str(
            r#"{"id": null, "task_name": null, "description": 7, "due_date": "2024-03-05"}"#,
        )
        .unwrap();
        assert_eq!(task.id.as_str(), "");
        assert_eq!(task.task_name, "");
        assert!(task.description.is_none());
        assert!(task.due().is_some());

        let task: TaskRecord = serde_json::from_str(r#"{"task_name": ["x"]}"#).unwrap();
        assert_eq!(task.task_name, "");
    }

    #[test]
    fn parses_bare_date_as_utc_midnight() {
        let due = parse_due_date("2024-03-04").unwrap();
        assert_eq!(due.offset().local_minus_utc(), 0);
        assert_eq!((due.hour(), due.minute()), (0, 0));
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn keeps_offset_of_timestamp() {
        let due = parse_due_date("2024-03-04T22:00:00-05:00").unwrap();
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(
            due.with_timezone(&Utc).date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn parses_offsetless_and_space_separated_timestamps() {
        assert!(parse_due_date("2024-03-04T10:30:00").is_some());
        assert!(parse_due_date("2024-03-04T10:30").is_some());
        assert!(parse_due_date("2024-03-04 10:30:00").is_some());
        assert!(parse_due_date("2024-03-04 10:30:00+00:00").is_some());
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_due_date("").is_none());
        assert!(parse_due_date("tomorrow").is_none());
        assert!(parse_due_date("2024-13-40").is_none());
    }
}
