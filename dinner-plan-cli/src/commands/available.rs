//! Available meals view.

use std::cell::RefCell;

use clap::{Args, ValueEnum};

use dinner_plan_core::Planner;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Show the meals marked available for this week.
#[derive(Args)]
pub struct AvailableCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl AvailableCommand {
    pub fn run(&self, planner: &RefCell<Planner>) -> Result<(), Box<dyn std::error::Error>> {
        let meals = planner.borrow().available_meals();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&meals)?);
            }
            OutputFormat::Table => {
                if meals.is_empty() {
                    println!("No meals currently selected as available.");
                    return Ok(());
                }

                println!("Available Meals:");
                for meal in &meals {
                    println!("  - {}", meal.name);
                }
            }
        }
        Ok(())
    }
}
