use clap::Subcommand;
use organizer_core::{CapacityTable, Config};

#[derive(Subcommand)]
pub enum CapacityAction {
    /// Show hours available per weekday
    Show {
        /// Print as a JSON array (Monday first)
        #[arg(long)]
        json: bool,
    },
    /// Set hours for every weekday, Monday first
    Set {
        /// Seven values: Mon Tue Wed Thu Fri Sat Sun
        #[arg(num_args = 7, required = true, allow_negative_numbers = true)]
        hours: Vec<f64>,
    },
    /// Reset to 3 hours every day
    Reset,
}

pub fn run(action: CapacityAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CapacityAction::Show { json } => {
            let config = Config::load()?;
            let table = config.capacity_table()?;
            if json {
                println!("{}", serde_json::to_string(&table)?);
            } else {
                for (weekday, hours) in table.iter() {
                    println!("{weekday}: {hours}h");
                }
                println!("total: {}h", table.weekly_total());
            }
        }
        CapacityAction::Set { hours } => {
            let table = CapacityTable::from_slice(&hours)?;
            let mut config = Config::load()?;
            config.set_capacity_table(table);
            config.save()?;
            println!("capacity updated");
        }
        CapacityAction::Reset => {
            let mut config = Config::load()?;
            config.set_capacity_table(CapacityTable::default());
            config.save()?;
            println!("capacity reset to defaults");
        }
    }
    Ok(())
}
