//! Decoding meal records from generic key-value documents.
//!
//! Stores hand the engine raw documents (string keys, JSON values). The
//! functions here map them to [`Meal`] records explicitly, field by field,
//! failing closed: a record without a usable `name` is skipped rather than
//! surfaced half-built.

use serde_json::{Map, Value};

use crate::models::Meal;

/// Decodes a single document into a meal.
///
/// Returns `None` when the required `name` field is missing or not a
/// string. Optional fields fall back to their defaults: `checked` to
/// false, `ingredients` to empty (non-string entries are dropped),
/// `recipe` to empty.
pub fn decode_meal(id: impl Into<String>, fields: &Map<String, Value>) -> Option<Meal> {
    let name = match fields.get("name").and_then(Value::as_str) {
        Some(n) => n.to_string(),
        None => return None,
    };

    let available = fields
        .get("checked")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let ingredients = match fields.get("ingredients").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    let recipe = fields
        .get("recipe")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(
        Meal::new(name)
            .with_id(id)
            .with_available(available)
            .with_ingredients(ingredients)
            .with_recipe(recipe),
    )
}

/// Decodes an ordered document collection, skipping records that fail to
/// decode and logging each skip. Order of the surviving meals matches the
/// input.
pub fn decode_collection(docs: &[(String, Map<String, Value>)]) -> Vec<Meal> {
    let mut meals = Vec::with_capacity(docs.len());

    for (id, fields) in docs {
        match decode_meal(id.clone(), fields) {
            Some(meal) => meals.push(meal),
            None => {
                tracing::warn!("Skipping malformed meal document {}", id);
            }
        }
    }

    meals
}

/// Encodes a meal back into its document fields.
///
/// The id is the document key, never a field; `available` goes out under
/// the `checked` wire name.
pub fn encode_fields(meal: &Meal) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".to_string(), Value::String(meal.name.clone()));
    fields.insert("checked".to_string(), Value::Bool(meal.available));
    fields.insert(
        "ingredients".to_string(),
        Value::Array(
            meal.ingredients
                .iter()
                .map(|i| Value::String(i.clone()))
                .collect(),
        ),
    );
    fields.insert("recipe".to_string(), Value::String(meal.recipe.clone()));
    fields
}
