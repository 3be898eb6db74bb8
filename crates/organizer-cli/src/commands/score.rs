use clap::Args;
use organizer_core::task::parse_due_date;
use organizer_core::{CompletionValue, Hours, PriorityScorer};

use super::now_arg;

#[derive(Args)]
pub struct ScoreArgs {
    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub due: String,
    /// Estimated hours; non-numeric values add nothing
    #[arg(long)]
    pub hours: Option<String>,
    /// Completion fraction between 0 and 1
    #[arg(long, default_value_t = 0.0)]
    pub completion: f64,
    /// Reference time (RFC 3339, default: now)
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = now_arg(args.now.as_deref())?;
    let due = parse_due_date(&args.due);
    if due.is_none() {
        tracing::warn!(due = %args.due, "unparseable due date scores 0");
    }
    let hours = args.hours.map(Hours::Text).unwrap_or_default();
    let completion = CompletionValue::Fraction(args.completion).canonical();

    let score = PriorityScorer::new().score(due, completion, hours.parse(), now);
    println!("{score}");
    Ok(())
}
