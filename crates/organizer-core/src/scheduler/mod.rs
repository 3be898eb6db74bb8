//! Automatic day planner.
//!
//! Turns a freshly fetched task list into a date-keyed schedule:
//! - Scores every task with [`PriorityScorer`]
//! - Sorts by descending score, keeping fetch order for ties
//! - Packs the sorted list into days with [`DayPacker`]
//!
//! Every pass is computed from scratch. The reference instant is part of the
//! config, so a pass is fully determined by its inputs.

mod capacity;
mod packer;

pub use capacity::{CapacityTable, DEFAULT_HOURS_PER_DAY};
pub use packer::{DayPacker, ScoredTask};

use chrono::{DateTime, NaiveDate, Utc};

use crate::priority::{PriorityScorer, PriorityWeights};
use crate::schedule::ScheduleMap;
use crate::task::TaskRecord;

/// Planner configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Reference instant for scoring and overdue classification
    pub now: DateTime<Utc>,
    /// First day tasks may be placed on; defaults to the UTC date of `now`
    pub start_date: Option<NaiveDate>,
    /// Hours available per weekday
    pub capacity: CapacityTable,
    /// Priority weights
    pub weights: PriorityWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl PlannerConfig {
    /// Default config pinned to `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            start_date: None,
            capacity: CapacityTable::default(),
            weights: PriorityWeights::default(),
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_capacity(mut self, capacity: CapacityTable) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Day packing starts on.
    pub fn start(&self) -> NaiveDate {
        self.start_date.unwrap_or_else(|| self.now.date_naive())
    }
}

/// Scores, orders and packs tasks into days.
pub struct Planner {
    config: PlannerConfig,
    scorer: PriorityScorer,
    packer: DayPacker,
}

impl Planner {
    /// Create a planner with default config at the current time
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            scorer: PriorityScorer::with_weights(config.weights),
            packer: DayPacker::new(config.capacity),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Score `tasks` and sort them by descending priority.
    ///
    /// The sort is stable: tasks with equal scores keep their input order.
    pub fn prioritize<'a>(&self, tasks: &'a [TaskRecord]) -> Vec<ScoredTask<'a>> {
        let mut scored: Vec<ScoredTask<'a>> = tasks
            .iter()
            .map(|task| ScoredTask {
                task,
                priority: self.scorer.score_task(task, self.config.now),
            })
            .collect();

        scored.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        scored
    }

    /// Build the schedule for `tasks`.
    pub fn plan(&self, tasks: &[TaskRecord]) -> ScheduleMap {
        let start = self.config.start();
        let scored = self.prioritize(tasks);
        let schedule = self.packer.pack(&scored, start, self.config.now);

        tracing::debug!(
            tasks = tasks.len(),
            days = schedule.day_count(),
            %start,
            last_day = ?schedule.last_day(),
            "planned schedule"
        );
        schedule
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}
