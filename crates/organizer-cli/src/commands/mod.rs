pub mod capacity;
pub mod config;
pub mod plan;
pub mod score;

use chrono::{DateTime, NaiveDate, Utc};
use organizer_core::task::parse_instant;
use organizer_core::ValidationError;

/// Parse a `--now` argument, defaulting to the current time.
pub fn now_arg(now: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    match now {
        Some(raw) => parse_instant(raw).ok_or_else(|| ValidationError::InvalidDate {
            input: raw.to_string(),
        }),
        None => Ok(Utc::now()),
    }
}

/// Parse a `YYYY-MM-DD` argument.
pub fn date_arg(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        input: raw.to_string(),
    })
}
