//! Plan command: distribute tasks across days.

use std::io::Read;

use clap::Args;
use organizer_core::{Config, Planner, PlannerConfig, ScheduleMap, TaskRecord};

use super::{date_arg, now_arg};

#[derive(Args)]
pub struct PlanArgs {
    /// JSON array of task records; "-" reads stdin
    #[arg(default_value = "-")]
    pub input: String,
    /// First day to schedule on (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub start: Option<String>,
    /// Reference time for scoring (RFC 3339, default: now)
    #[arg(long)]
    pub now: Option<String>,
    /// Days to render in the agenda (default: agenda.days from config)
    #[arg(long)]
    pub days: Option<u32>,
    /// Print the schedule map as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = read_tasks(&args.input)?;
    let config = Config::load_or_default();

    let mut planner_config = PlannerConfig::at(now_arg(args.now.as_deref())?)
        .with_capacity(config.capacity_table()?);
    if let Some(start) = args.start.as_deref() {
        planner_config = planner_config.with_start_date(date_arg(start)?);
    }
    let start = planner_config.start();

    let schedule = Planner::with_config(planner_config).plan(&tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    let days = agenda_length(&schedule, start, args.days.unwrap_or(config.agenda.days));
    print!("{}", render_agenda(&schedule, start, days, config.agenda.show_empty_days));
    Ok(())
}

fn read_tasks(input: &str) -> Result<Vec<TaskRecord>, Box<dyn std::error::Error>> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input).map_err(|e| format!("cannot read {input}: {e}"))?
    };
    let tasks: Vec<TaskRecord> = serde_json::from_str(&content)?;
    tracing::debug!(count = tasks.len(), "loaded task records");
    Ok(tasks)
}

/// Render at least `days` days, extended to the last scheduled day.
fn agenda_length(schedule: &ScheduleMap, start: chrono::NaiveDate, days: u32) -> u32 {
    let needed = schedule
        .last_day()
        .map(|last| (last - start).num_days() + 1)
        .unwrap_or(0);
    days.max(u32::try_from(needed).unwrap_or(u32::MAX))
}

fn render_agenda(
    schedule: &ScheduleMap,
    start: chrono::NaiveDate,
    days: u32,
    show_empty: bool,
) -> String {
    let mut out = String::new();
    for (day, tasks) in schedule.agenda(start, days) {
        if tasks.is_empty() {
            if show_empty {
                out.push_str(&format!("{} ({})\n  No tasks for this day\n", day, day.format("%a")));
            }
            continue;
        }

        let used: f64 = tasks.iter().map(|t| t.effective_hours).sum();
        out.push_str(&format!("{} ({}) {:.1}h\n", day, day.format("%a"), used));
        for task in tasks {
            let due = if task.date.is_empty() { "no due date" } else { task.date.as_str() };
            out.push_str(&format!(
                "  [{}] {} (due {}, {:.1}h, priority {})\n",
                task.status.as_str(),
                task.name,
                due,
                task.effective_hours,
                task.priority
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn schedule() -> ScheduleMap {
        let tasks = vec![
            TaskRecord::new("a", "Essay", "2024-03-05").with_hours(2.0.into()),
            TaskRecord::new("b", "Lab", "2024-03-06").with_hours(3.0.into()),
        ];
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        Planner::with_config(PlannerConfig::at(now)).plan(&tasks)
    }

    #[test]
    fn agenda_extends_to_last_scheduled_day() {
        assert_eq!(agenda_length(&schedule(), monday(), 1), 2);
        assert_eq!(agenda_length(&schedule(), monday(), 5), 5);
        assert_eq!(agenda_length(&ScheduleMap::new(), monday(), 3), 3);
    }

    #[test]
    fn render_lists_tasks_and_placeholders() {
        let text = render_agenda(&schedule(), monday(), 3, true);
        assert!(text.contains("2024-03-04 (Mon) 3.0h"));
        assert!(text.contains("[pending] Lab (due 2024-03-06, 3.0h, priority 12)"));
        assert!(text.contains("2024-03-06 (Wed)\n  No tasks for this day"));
    }

    #[test]
    fn render_can_hide_empty_days() {
        let text = render_agenda(&schedule(), monday(), 3, false);
        assert!(!text.contains("No tasks for this day"));
    }
}
