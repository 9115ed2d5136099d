//! Weekly meal planning views over a live meal collection.
//!
//! The [`Planner`] owns the locally known meal collection and derives the
//! three views the app renders: all meals, meals marked available for the
//! week, and the combined shopping list. Snapshots from the store replace
//! the collection wholesale; availability toggles the user has requested
//! but the store has not yet confirmed are kept in an optimistic overlay
//! that wins over stale snapshot values until the store catches up.
//!
//! The planner is single-threaded by contract: callers invoke it from one
//! sequential context and serialize access themselves. No method blocks,
//! and every method is O(collection size).

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Meal;

/// Errors from planner queries.
#[derive(Debug, Error, PartialEq)]
pub enum PlannerError {
    #[error("No meal with id {0} in the current collection")]
    NotFound(String),
}

/// Derives planning views from meal snapshots and pending toggles.
pub struct Planner {
    meals: Vec<Meal>,
    pending: HashMap<String, bool>,
    version: u64,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            meals: Vec::new(),
            pending: HashMap::new(),
            version: 0,
        }
    }

    /// Replaces the meal collection with a fresh store snapshot.
    ///
    /// Must be called once per store notification, including the first.
    /// Pending toggles are pruned entry by entry: an entry whose id now
    /// carries the requested value in the snapshot is confirmed and
    /// removed, and an entry whose id is absent from the snapshot is
    /// dropped so the overlay stays bounded. An entry whose snapshot value
    /// still disagrees is retained: the optimistic value keeps winning in
    /// the display until the write lands or the toggle is re-requested.
    pub fn apply_snapshot(&mut self, meals: Vec<Meal>) {
        self.meals = meals;

        let meals = &self.meals;
        self.pending.retain(|id, requested| {
            match meals.iter().find(|m| m.id.as_deref() == Some(id.as_str())) {
                Some(meal) => meal.available != *requested,
                None => false,
            }
        });

        self.version += 1;
    }

    /// Records an optimistic availability toggle for `id`.
    ///
    /// Takes effect in the display immediately. Issuing the matching store
    /// update is the caller's responsibility and is fire-and-forget from
    /// the planner's perspective; a failed store call leaves the overlay
    /// in place, and the caller re-requests the prior value if it wants a
    /// rollback.
    pub fn request_toggle(&mut self, id: impl Into<String>, value: bool) {
        self.pending.insert(id.into(), value);
        self.version += 1;
    }

    /// All meals in collection order, with availability seen through the
    /// pending overlay.
    pub fn display_meals(&self) -> Vec<Meal> {
        self.meals
            .iter()
            .map(|meal| {
                let mut meal = meal.clone();
                if let Some(id) = meal.id.as_deref() {
                    if let Some(&requested) = self.pending.get(id) {
                        meal.available = requested;
                    }
                }
                meal
            })
            .collect()
    }

    /// Meals effectively available for the week, in collection order.
    pub fn available_meals(&self) -> Vec<Meal> {
        self.display_meals()
            .into_iter()
            .filter(|m| m.available)
            .collect()
    }

    /// Combined shopping list for the available meals: every ingredient,
    /// deduplicated by exact string match, sorted ascending.
    pub fn shopping_list(&self) -> Vec<String> {
        let mut ingredients: Vec<String> = self
            .available_meals()
            .into_iter()
            .flat_map(|m| m.ingredients)
            .collect();
        ingredients.sort();
        ingredients.dedup();
        ingredients
    }

    /// Looks up a meal by id in the raw collection.
    ///
    /// The pending overlay is not applied here; the detail view reflects
    /// what the store last reported.
    pub fn meal_detail(&self, id: &str) -> Result<&Meal, PlannerError> {
        self.meals
            .iter()
            .find(|m| m.id.as_deref() == Some(id))
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))
    }

    /// True while a toggle for `id` awaits store confirmation.
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Monotonic state version; bumps on every snapshot or toggle, so a
    /// UI can poll it to decide when to re-render.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(id: &str, name: &str, available: bool, ingredients: &[&str]) -> Meal {
        Meal::new(name)
            .with_id(id)
            .with_available(available)
            .with_ingredients(ingredients.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_shopping_list_sorted_and_deduplicated() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![
            meal("1", "Tacos", true, &["Beef", "Cheese"]),
            meal("2", "Pizza", true, &["Cheese", "Dough"]),
        ]);

        assert_eq!(planner.shopping_list(), vec!["Beef", "Cheese", "Dough"]);
    }

    #[test]
    fn test_shopping_list_ignores_unavailable_meals() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![
            meal("1", "Tacos", true, &["Beef"]),
            meal("2", "Pizza", false, &["Dough"]),
        ]);

        assert_eq!(planner.shopping_list(), vec!["Beef"]);
    }

    #[test]
    fn test_available_meals_preserve_collection_order() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![
            meal("1", "Zucchini Bake", true, &[]),
            meal("2", "Pizza", false, &[]),
            meal("3", "Apple Pie", true, &[]),
        ]);

        let names: Vec<String> = planner
            .available_meals()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Zucchini Bake", "Apple Pie"]);
    }

    #[test]
    fn test_apply_snapshot_is_idempotent() {
        let snapshot = vec![
            meal("1", "Tacos", true, &["Beef"]),
            meal("2", "Pizza", false, &["Dough"]),
        ];

        let mut planner = Planner::new();
        planner.apply_snapshot(snapshot.clone());
        let first = planner.display_meals();
        planner.apply_snapshot(snapshot);
        assert_eq!(planner.display_meals(), first);
    }

    #[test]
    fn test_optimistic_toggle_shows_immediately() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &["Beef"])]);

        planner.request_toggle("1", true);
        assert!(planner.is_pending("1"));
        assert!(planner.display_meals()[0].available);
        // The overlay feeds the derived views too
        assert_eq!(planner.shopping_list(), vec!["Beef"]);
    }

    #[test]
    fn test_matching_snapshot_confirms_and_clears_toggle() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);

        planner.request_toggle("1", true);
        planner.apply_snapshot(vec![meal("1", "Tacos", true, &[])]);

        assert!(!planner.is_pending("1"));
        assert!(planner.display_meals()[0].available);
    }

    #[test]
    fn test_stale_snapshot_does_not_flip_display_back() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);

        planner.request_toggle("1", true);
        // A stale read racing the write still reports false
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);

        assert!(planner.is_pending("1"));
        assert!(planner.display_meals()[0].available);

        // Once the write lands the overlay clears; a later genuine false
        // is then displayed as false again.
        planner.apply_snapshot(vec![meal("1", "Tacos", true, &[])]);
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);
        assert!(!planner.is_pending("1"));
        assert!(!planner.display_meals()[0].available);
    }

    #[test]
    fn test_toggle_for_vanished_meal_is_pruned() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);

        planner.request_toggle("ghost", true);
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);

        assert!(!planner.is_pending("ghost"));
    }

    #[test]
    fn test_re_requesting_toggle_overwrites_pending_value() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);

        planner.request_toggle("1", true);
        planner.request_toggle("1", false);

        assert!(!planner.display_meals()[0].available);
        // Snapshot already agrees with the re-requested value
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);
        assert!(!planner.is_pending("1"));
    }

    #[test]
    fn test_meal_detail_found_and_not_found() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &["Beef"])]);

        let detail = planner.meal_detail("1").unwrap();
        assert_eq!(detail.name, "Tacos");

        assert_eq!(
            planner.meal_detail("missing-id"),
            Err(PlannerError::NotFound("missing-id".to_string()))
        );
    }

    #[test]
    fn test_meal_detail_reports_store_value_not_overlay() {
        let mut planner = Planner::new();
        planner.apply_snapshot(vec![meal("1", "Tacos", false, &[])]);
        planner.request_toggle("1", true);

        assert!(!planner.meal_detail("1").unwrap().available);
        assert!(planner.display_meals()[0].available);
    }

    #[test]
    fn test_version_bumps_on_state_changes() {
        let mut planner = Planner::new();
        assert_eq!(planner.version(), 0);

        planner.apply_snapshot(Vec::new());
        assert_eq!(planner.version(), 1);

        planner.request_toggle("1", true);
        assert_eq!(planner.version(), 2);
    }

    #[test]
    fn test_empty_collection_views() {
        let mut planner = Planner::new();
        planner.apply_snapshot(Vec::new());

        assert!(planner.display_meals().is_empty());
        assert!(planner.available_meals().is_empty());
        assert!(planner.shopping_list().is_empty());
    }
}
