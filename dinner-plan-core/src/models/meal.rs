use serde::{Deserialize, Serialize};
use std::fmt;

/// A meal record as stored in the meal collection.
///
/// `id` is assigned by the store on creation and is `None` for a draft
/// that has not been persisted yet. The `available` flag marks the meal
/// for the current planning week; it is serialized under the wire name
/// `checked`, which is what the document schema uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "checked", default)]
    pub available: bool,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub recipe: String,
}

impl Meal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            available: false,
            ingredients: Vec::new(),
            recipe: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_recipe(mut self, recipe: impl Into<String>) -> Self {
        self.recipe = recipe.into();
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// True once the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;

        writeln!(
            f,
            "Available this week: {}",
            if self.available { "yes" } else { "no" }
        )?;

        writeln!(f, "\nIngredients:")?;
        if self.ingredients.is_empty() {
            writeln!(f, "  (none listed)")?;
        } else {
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.recipe.is_empty() {
            writeln!(f, "\nRecipe:\n{}", self.recipe)?;
        }

        Ok(())
    }
}
