mod available;
mod config_cmd;
pub mod meal;
mod shopping;

pub use available::AvailableCommand;
pub use config_cmd::ConfigCommand;
pub use meal::MealCommand;
pub use shopping::ShoppingCommand;
