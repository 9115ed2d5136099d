//! Shopping list view.
//!
//! The combined ingredients of every available meal, deduplicated and
//! sorted.

use std::cell::RefCell;

use clap::{Args, ValueEnum};

use dinner_plan_core::Planner;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Show the shopping list for the available meals.
#[derive(Args)]
pub struct ShoppingCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ShoppingCommand {
    pub fn run(&self, planner: &RefCell<Planner>) -> Result<(), Box<dyn std::error::Error>> {
        let planner = planner.borrow();
        let items = planner.shopping_list();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
            OutputFormat::Table => {
                if items.is_empty() {
                    if planner.available_meals().is_empty() {
                        println!("No meals selected as available.");
                    } else {
                        println!("Selected meals have no ingredients listed.");
                    }
                    return Ok(());
                }

                println!("Required Ingredients:");
                for item in &items {
                    println!("  - {}", item);
                }
            }
        }
        Ok(())
    }
}
