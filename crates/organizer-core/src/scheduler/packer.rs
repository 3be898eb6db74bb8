//! Greedy day packing.
//!
//! Tasks are taken in priority order and placed on the current day while
//! they fit its capacity. A task that does not fit moves the cursor to the
//! next calendar day and is placed there unconditionally, even when it is
//! larger than that day's capacity. The cursor never moves backwards, so
//! slack left on an earlier day is never back-filled.

use chrono::{DateTime, NaiveDate, Utc};

use super::capacity::CapacityTable;
use crate::schedule::{ScheduleMap, ScheduledTaskView};
use crate::task::TaskRecord;

/// A task paired with its computed priority.
#[derive(Debug, Clone, Copy)]
pub struct ScoredTask<'a> {
    pub task: &'a TaskRecord,
    pub priority: f64,
}

/// Forward-only packer over a weekly capacity table.
#[derive(Debug, Clone, Default)]
pub struct DayPacker {
    capacity: CapacityTable,
}

impl DayPacker {
    pub fn new(capacity: CapacityTable) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> &CapacityTable {
        &self.capacity
    }

    /// Pack `tasks` starting on `start`.
    ///
    /// `tasks` must already be sorted by descending priority. `now` is only
    /// used to classify each task for display; it has no effect on
    /// placement.
    pub fn pack(
        &self,
        tasks: &[ScoredTask<'_>],
        start: NaiveDate,
        now: DateTime<Utc>,
    ) -> ScheduleMap {
        let days = self.assign_days(tasks.iter().map(|s| s.task.time_to_take.effective()), start);

        let mut schedule = ScheduleMap::new();
        for (scored, day) in tasks.iter().zip(days) {
            schedule.push(day, ScheduledTaskView::from_task(scored.task, scored.priority, now));
        }
        schedule
    }

    /// Day for each effective duration in `hours`, in input order.
    pub fn assign_days<I>(&self, hours: I, start: NaiveDate) -> Vec<NaiveDate>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut cursor = DayCursor::new(start);
        hours.into_iter().map(|h| cursor.place(h, &self.capacity)).collect()
    }
}

/// Running state of a packing pass.
struct DayCursor {
    day: NaiveDate,
    hours_used: f64,
}

impl DayCursor {
    fn new(start: NaiveDate) -> Self {
        Self {
            day: start,
            hours_used: 0.0,
        }
    }

    fn place(&mut self, hours: f64, capacity: &CapacityTable) -> NaiveDate {
        let available = capacity.for_date(self.day);

        if self.hours_used + hours <= available {
            self.hours_used += hours;
            tracing::trace!(day = %self.day, hours, used = self.hours_used, "placed task");
            return self.day;
        }

        match self.day.succ_opt() {
            Some(next) => self.day = next,
            None => tracing::warn!(day = %self.day, "calendar exhausted, stacking on last day"),
        }
        self.hours_used = hours;
        tracing::debug!(
            day = %self.day,
            hours,
            capacity = capacity.for_date(self.day),
            "day full, task opens next day"
        );
        self.day
    }
}
