//! Meal CLI commands.
//!
//! Add, edit and inspect meals, and flip their weekly availability.

use std::cell::RefCell;

use clap::{Args, Subcommand, ValueEnum};

use dinner_plan_core::{EditSession, MealStore, Planner};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// List all meals
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a new meal
    Add {
        /// Meal name
        #[arg(long, short)]
        name: String,

        /// Ingredients (comma-separated)
        #[arg(long, short, value_name = "LIST")]
        ingredients: Option<String>,

        /// Recipe text
        #[arg(long, short)]
        recipe: Option<String>,
    },

    /// Edit an existing meal (full-record update)
    Edit {
        /// Meal id
        id: String,

        /// New meal name
        #[arg(long)]
        name: Option<String>,

        /// New ingredients (comma-separated, replaces the list)
        #[arg(long, value_name = "LIST")]
        ingredients: Option<String>,

        /// New recipe text
        #[arg(long)]
        recipe: Option<String>,
    },

    /// Show one meal in full
    Show {
        /// Meal id
        id: String,
    },

    /// Mark a meal as available for the week
    Check {
        /// Meal id
        id: String,
    },

    /// Mark a meal as not available for the week
    Uncheck {
        /// Meal id
        id: String,
    },
}

impl MealCommand {
    pub fn run(
        &self,
        store: &dyn MealStore,
        planner: &RefCell<Planner>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealSubcommand::List { format } => self.list(planner, format),
            MealSubcommand::Add {
                name,
                ingredients,
                recipe,
            } => self.add(store, name, ingredients, recipe),
            MealSubcommand::Edit {
                id,
                name,
                ingredients,
                recipe,
            } => self.edit(store, planner, id, name, ingredients, recipe),
            MealSubcommand::Show { id } => {
                let meal = planner.borrow().meal_detail(id)?.clone();
                print!("{}", meal);
                Ok(())
            }
            MealSubcommand::Check { id } => self.toggle(store, planner, id, true),
            MealSubcommand::Uncheck { id } => self.toggle(store, planner, id, false),
        }
    }

    fn list(
        &self,
        planner: &RefCell<Planner>,
        format: &OutputFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let meals = planner.borrow().display_meals();

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&meals)?);
            }
            OutputFormat::Table => {
                if meals.is_empty() {
                    println!("No meals yet. Add one with 'dinner meal add --name <NAME>'.");
                    return Ok(());
                }

                println!("Meals");
                println!("{}", "=".repeat(44));
                for meal in &meals {
                    let check = if meal.available { "[x]" } else { "[ ]" };
                    let id = meal.id.as_deref().unwrap_or("-");
                    println!("{} {:<25} {}", check, meal.name, id);
                }
            }
        }
        Ok(())
    }

    fn add(
        &self,
        store: &dyn MealStore,
        name: &str,
        ingredients: &Option<String>,
        recipe: &Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = EditSession::new();
        session.set_name(name);
        if let Some(list) = ingredients {
            session.set_ingredients_text(list.as_str());
        }
        if let Some(text) = recipe {
            session.set_recipe(text.as_str());
        }

        let meal = session.build()?;
        let id = store.create(&meal)?;

        println!("Added meal '{}' ({})", meal.name, id);
        Ok(())
    }

    fn edit(
        &self,
        store: &dyn MealStore,
        planner: &RefCell<Planner>,
        id: &str,
        name: &Option<String>,
        ingredients: &Option<String>,
        recipe: &Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let existing = planner.borrow().meal_detail(id)?.clone();

        let mut session = EditSession::edit(&existing);
        if let Some(text) = name {
            session.set_name(text.as_str());
        }
        if let Some(list) = ingredients {
            session.set_ingredients_text(list.as_str());
        }
        if let Some(text) = recipe {
            session.set_recipe(text.as_str());
        }

        let meal = session.build()?;
        store.replace(id, &meal)?;

        println!("Updated meal '{}' ({})", meal.name, id);
        Ok(())
    }

    fn toggle(
        &self,
        store: &dyn MealStore,
        planner: &RefCell<Planner>,
        id: &str,
        value: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let name = planner.borrow().meal_detail(id)?.name.clone();

        // Optimistic first; the store update is fire-and-forget and a
        // failure leaves the overlay in place.
        planner.borrow_mut().request_toggle(id, value);
        if let Err(e) = store.set_available(id, value) {
            tracing::warn!("Availability update for {} failed: {}", id, e);
            eprintln!("Warning: update not saved: {}", e);
        }

        if value {
            println!("'{}' is available this week.", name);
        } else {
            println!("'{}' is no longer available this week.", name);
        }
        Ok(())
    }
}
