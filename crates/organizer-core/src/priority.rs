//! Task priority scoring.
//!
//! A task's score is linear in how close it is to its due date, plus a
//! bonus for the work still left on it:
//!
//! ```text
//! score = due_today - per_day * days_until_due
//!       + per_hour * hours * (1 - completion)
//! ```
//!
//! `days_until_due` is the floor of the whole days between now and the due
//! instant, so a task due later today counts as 0 and one due yesterday as
//! -1. Scores are not clamped: far-future tasks go deeply negative and long
//! overdue tasks keep climbing. Higher scores are packed first.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Completion, ParsedHours, TaskRecord};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Priority calculation weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Score of a task due today (default 7)
    pub due_today_weight: f64,
    /// Score lost per day of lead time, gained per day overdue (default 1)
    pub per_day_weight: f64,
    /// Score per remaining estimated hour (default 2)
    pub per_hour_weight: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            due_today_weight: 7.0,
            per_day_weight: 1.0,
            per_hour_weight: 2.0,
        }
    }
}

/// Priority scorer for tasks
#[derive(Debug, Clone, Default)]
pub struct PriorityScorer {
    weights: PriorityWeights,
}

impl PriorityScorer {
    /// Create a scorer with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    /// Score a task relative to `now`.
    ///
    /// # Arguments
    /// * `due` - Due instant; `None` when missing or malformed
    /// * `completion` - Fraction of the task already done
    /// * `hours` - Parsed estimate; an unparseable estimate adds nothing
    /// * `now` - Reference instant
    ///
    /// # Returns
    /// A finite score. Anything that would produce NaN or infinity
    /// (including a missing due date) scores 0.
    pub fn score(
        &self,
        due: Option<DateTime<FixedOffset>>,
        completion: Completion,
        hours: ParsedHours,
        now: DateTime<Utc>,
    ) -> f64 {
        let Some(due) = due else {
            return 0.0;
        };

        let days_until_due = days_until(due, now);
        let mut score =
            self.weights.due_today_weight - self.weights.per_day_weight * days_until_due;

        if let ParsedHours::Parsed(h) = hours {
            score += self.weights.per_hour_weight * h * (1.0 - completion.fraction());
        }

        if score.is_finite() {
            score
        } else {
            0.0
        }
    }

    /// Score a stored task.
    pub fn score_task(&self, task: &TaskRecord, now: DateTime<Utc>) -> f64 {
        self.score(task.due(), task.completion(), task.time_to_take.parse(), now)
    }
}

/// Whole days from `now` until `due`, rounded toward negative infinity.
pub fn days_until(due: DateTime<FixedOffset>, now: DateTime<Utc>) -> f64 {
    let millis = due.with_timezone(&Utc).signed_duration_since(now).num_milliseconds();
    (millis as f64 / MILLIS_PER_DAY).floor()
}
