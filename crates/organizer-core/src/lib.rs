//! # Organizer Core Library
//!
//! Core business logic for the Organizer to-do calendar: deciding which
//! tasks to work on first and which day each one lands on. The CLI binary
//! is a thin layer over this crate; task storage, sign-in and rendering live
//! elsewhere and hand this crate an already-fetched task list.
//!
//! ## Architecture
//!
//! - **Task model**: loosely typed task records with explicit coercion of
//!   durations and completion state
//! - **Priority**: linear due-date and remaining-work score
//! - **Scheduler**: greedy, forward-only packing of prioritized tasks into
//!   days under a per-weekday hour budget
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Planner`]: score, sort and pack in one pass
//! - [`PriorityScorer`]: per-task priority score
//! - [`DayPacker`]: day assignment under a [`CapacityTable`]
//! - [`ScheduleMap`]: date-keyed output of a pass
//! - [`Config`]: Application configuration management

pub mod error;
pub mod priority;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod task;

pub use error::{ConfigError, CoreError, ValidationError};
pub use priority::{PriorityScorer, PriorityWeights};
pub use schedule::{ScheduleMap, ScheduledTaskView, TaskStatus};
pub use scheduler::{CapacityTable, DayPacker, Planner, PlannerConfig, ScoredTask};
pub use storage::Config;
pub use task::{Completion, CompletionValue, Hours, ParsedHours, TaskId, TaskRecord};
