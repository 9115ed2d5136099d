//! Dinner Plan Core Library
//!
//! Shared types and planning logic for Dinner Plan applications.

pub mod document;
pub mod models;
pub mod planner;
pub mod session;
pub mod store;

pub use document::{decode_collection, decode_meal, encode_fields};
pub use models::Meal;
pub use planner::{Planner, PlannerError};
pub use session::{split_ingredients, EditSession, SessionError};
pub use store::{MealStore, MemoryStore, SnapshotCallback, StoreError, SubscriptionHandle};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
