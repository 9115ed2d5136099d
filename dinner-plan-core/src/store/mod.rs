//! Meal store collaborator contract.
//!
//! The planner itself never talks to a store; the surrounding application
//! subscribes to one and feeds every snapshot into
//! [`Planner::apply_snapshot`](crate::Planner::apply_snapshot). This
//! module defines the contract a store implementation provides, plus an
//! in-memory reference implementation used in tests and by embedders that
//! need no persistence.

mod memory;

pub use memory::MemoryStore;

use std::rc::Rc;

use thiserror::Error;

use crate::models::Meal;

/// Callback invoked with the full ordered meal collection on every
/// delivery. Duplicate deliveries per logical change are allowed; the
/// planner is idempotent.
pub type SnapshotCallback = Rc<dyn Fn(&[Meal])>;

/// Identifies one subscription for later teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// Wraps a store-chosen listener id. Only store implementations
    /// should mint handles.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed store data: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("No meal with id {0} in the store")]
    UnknownId(String),
}

/// A document store holding the meal collection.
///
/// Implementations deliver an initial snapshot on subscribe and a fresh
/// snapshot after every mutation. Mutation failures surface as errors to
/// the caller; they never reach the planner, whose optimistic state is
/// not rolled back on failure.
pub trait MealStore {
    /// Registers a snapshot listener. The current snapshot is delivered
    /// before this returns.
    fn subscribe(&self, on_snapshot: SnapshotCallback) -> SubscriptionHandle;

    /// Removes a listener. Unknown handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);

    /// Persists a draft meal and returns the assigned id.
    fn create(&self, meal: &Meal) -> Result<String, StoreError>;

    /// Replaces the full record stored under `id`.
    fn replace(&self, id: &str, meal: &Meal) -> Result<(), StoreError>;

    /// Updates only the availability flag of the record under `id`.
    fn set_available(&self, id: &str, value: bool) -> Result<(), StoreError>;
}
