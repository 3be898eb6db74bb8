//! Hours available per weekday.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Hours per day used when nothing is configured.
pub const DEFAULT_HOURS_PER_DAY: f64 = 3.0;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Maximum effective hours schedulable on each weekday.
///
/// Index 0 is Monday, matching `Weekday::num_days_from_monday`. Entries are
/// finite and non-negative; negative input is stored as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CapacityTable {
    hours: [f64; 7],
}

impl CapacityTable {
    /// Build a table, Monday first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCapacity`] for NaN or infinite
    /// entries.
    pub fn new(hours: [f64; 7]) -> Result<Self, ValidationError> {
        let mut normalized = hours;
        for (slot, weekday) in normalized.iter_mut().zip(WEEKDAYS) {
            if !slot.is_finite() {
                return Err(ValidationError::InvalidCapacity { weekday, value: *slot });
            }
            if *slot < 0.0 {
                tracing::warn!(%weekday, hours = *slot, "negative capacity treated as zero");
                *slot = 0.0;
            }
        }
        Ok(Self { hours: normalized })
    }

    /// Build a table from a slice of exactly seven entries.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CapacityLength`] when the slice is not seven
    /// long, or any error from [`CapacityTable::new`].
    pub fn from_slice(hours: &[f64]) -> Result<Self, ValidationError> {
        let hours: [f64; 7] = hours
            .try_into()
            .map_err(|_| ValidationError::CapacityLength { len: hours.len() })?;
        Self::new(hours)
    }

    /// Same capacity every day.
    ///
    /// # Errors
    ///
    /// See [`CapacityTable::new`].
    pub fn uniform(hours: f64) -> Result<Self, ValidationError> {
        Self::new([hours; 7])
    }

    pub fn for_weekday(&self, weekday: Weekday) -> f64 {
        self.hours[weekday.num_days_from_monday() as usize]
    }

    pub fn for_date(&self, date: NaiveDate) -> f64 {
        self.for_weekday(date.weekday())
    }

    /// Total hours across a week.
    pub fn weekly_total(&self) -> f64 {
        self.hours.iter().sum()
    }

    pub fn as_array(&self) -> [f64; 7] {
        self.hours
    }

    /// `(weekday, hours)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, f64)> + '_ {
        WEEKDAYS.into_iter().zip(self.hours.iter().copied())
    }
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            hours: [DEFAULT_HOURS_PER_DAY; 7],
        }
    }
}

impl TryFrom<Vec<f64>> for CapacityTable {
    type Error = ValidationError;

    fn try_from(hours: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&hours)
    }
}

impl From<CapacityTable> for Vec<f64> {
    fn from(table: CapacityTable) -> Self {
        table.hours.to_vec()
    }
}
