use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod store;

use commands::{AvailableCommand, ConfigCommand, MealCommand, ShoppingCommand};
use config::Config;
use dinner_plan_core::{Meal, MealStore, Planner};
use store::JsonFileStore;

#[derive(Parser)]
#[command(name = "dinner")]
#[command(version)]
#[command(about = "Plan dinners for the week", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage meals
    Meal(MealCommand),

    /// Show meals available for this week
    Available(AvailableCommand),

    /// Show the shopping list for the available meals
    Shopping(ShoppingCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;

    if let Commands::Config(cmd) = &cli.command {
        return cmd.run(&config);
    }

    let store = JsonFileStore::open(&config.store_path.value)?;

    // The planner mirrors the store: every snapshot the subscription
    // delivers (the initial one included) replaces its collection.
    let planner = Rc::new(RefCell::new(Planner::new()));
    let sink = planner.clone();
    let handle = store.subscribe(Rc::new(move |meals: &[Meal]| {
        sink.borrow_mut().apply_snapshot(meals.to_vec());
    }));

    let result = match &cli.command {
        Commands::Meal(cmd) => cmd.run(&store, &planner),
        Commands::Available(cmd) => cmd.run(&planner),
        Commands::Shopping(cmd) => cmd.run(&planner),
        Commands::Config(_) => Ok(()),
    };

    store.unsubscribe(handle);
    result
}
