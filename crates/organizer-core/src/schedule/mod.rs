//! Schedule output types: the date-keyed map produced by a packing pass and
//! the per-task view models stored in it.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{CompletionValue, TaskId, TaskRecord, PROGRESS_STEP};

/// Display classification of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Overdue,
    Pending,
}

impl TaskStatus {
    /// Classify a task against `now`.
    ///
    /// Any recorded progress counts as completed. A task without a usable
    /// due date is never overdue.
    pub fn classify(task: &TaskRecord, now: DateTime<Utc>) -> Self {
        if task.completion().is_started() {
            return TaskStatus::Completed;
        }
        match task.due() {
            Some(due) if due.with_timezone(&Utc) < now => TaskStatus::Overdue,
            _ => TaskStatus::Pending,
        }
    }

    /// Agenda background color.
    pub fn color(self) -> &'static str {
        match self {
            TaskStatus::Completed => "#34C759",
            TaskStatus::Overdue => "#FF3B30",
            TaskStatus::Pending => "#007AFF",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
            TaskStatus::Pending => "pending",
        }
    }
}

/// Read-only projection of a task placed on a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskView {
    pub id: TaskId,
    pub name: String,
    /// Due date as `YYYY-MM-DD`; empty when the task has no usable due date.
    pub date: String,
    pub description: String,
    /// Completion exactly as stored.
    pub complete: CompletionValue,
    /// Canonical completion fraction.
    pub progress: f64,
    pub progress_per_click: f64,
    pub background_color: String,
    pub status: TaskStatus,
    pub priority: f64,
    /// Hours charged against the day's capacity.
    pub effective_hours: f64,
}

impl ScheduledTaskView {
    /// Build the view for `task`. Never mutates the record.
    pub fn from_task(task: &TaskRecord, priority: f64, now: DateTime<Utc>) -> Self {
        let status = TaskStatus::classify(task, now);
        Self {
            id: task.id.clone(),
            name: task.task_name.clone(),
            date: task
                .due()
                .map(|due| due.date_naive().format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            description: task.description.clone().unwrap_or_default(),
            complete: task.is_completed.clone(),
            progress: task.completion().fraction(),
            progress_per_click: PROGRESS_STEP,
            background_color: status.color().to_string(),
            status,
            priority,
            effective_hours: task.time_to_take.effective(),
        }
    }
}

/// Tasks grouped by the day they were packed into.
///
/// Days iterate in calendar order; tasks within a day keep packing order.
/// Days that received no task are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleMap {
    days: BTreeMap<NaiveDate, Vec<ScheduledTaskView>>,
}

impl ScheduleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to `day`.
    pub fn push(&mut self, day: NaiveDate, view: ScheduledTaskView) {
        self.days.entry(day).or_default().push(view);
    }

    /// Tasks on `day`, empty when nothing was placed there.
    pub fn tasks_on(&self, day: NaiveDate) -> &[ScheduledTaskView] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that received at least one task, in calendar order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[ScheduledTaskView])> + '_ {
        self.days.iter().map(|(day, tasks)| (*day, tasks.as_slice()))
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Number of days with tasks.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of scheduled tasks across all days.
    pub fn task_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Effective hours scheduled on `day`.
    pub fn hours_on(&self, day: NaiveDate) -> f64 {
        self.tasks_on(day).iter().map(|t| t.effective_hours).sum()
    }

    /// Every day from `start` for `days` days, including empty ones.
    ///
    /// Lets a renderer show a "no tasks" placeholder for gaps.
    pub fn agenda(&self, start: NaiveDate, days: u32) -> Vec<(NaiveDate, &[ScheduledTaskView])> {
        (0..i64::from(days))
            .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
            .map(|day| (day, self.tasks_on(day)))
            .collect()
    }
}
