//! Transient state for the add/edit meal form.
//!
//! An [`EditSession`] collects the raw text the user types and turns it
//! into a validated [`Meal`] on submit. Setters never validate; all
//! checking happens in [`EditSession::build`], which is pure and performs
//! no I/O. The caller submits the built meal to a store: create when the
//! id is `None`, full replace otherwise.

use thiserror::Error;

use crate::models::Meal;

/// Validation failures when building a meal from the form.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Meal name cannot be empty")]
    EmptyName,
}

/// Splits comma-separated ingredient text into the ingredient list.
///
/// Parts are trimmed, empty parts dropped, order and duplicates kept.
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Editable state for one add-or-edit interaction.
#[derive(Debug, Clone)]
pub struct EditSession {
    meal_id: Option<String>,
    available: bool,
    name: String,
    ingredients_text: String,
    recipe: String,
}

impl EditSession {
    /// Starts a blank session for a new meal.
    pub fn new() -> Self {
        Self {
            meal_id: None,
            available: false,
            name: String::new(),
            ingredients_text: String::new(),
            recipe: String::new(),
        }
    }

    /// Starts a session prefilled from an existing meal.
    pub fn edit(meal: &Meal) -> Self {
        Self {
            meal_id: meal.id.clone(),
            available: meal.available,
            name: meal.name.clone(),
            ingredients_text: meal.ingredients.join(", "),
            recipe: meal.recipe.clone(),
        }
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        self.name = text.into();
    }

    pub fn set_ingredients_text(&mut self, text: impl Into<String>) {
        self.ingredients_text = text.into();
    }

    pub fn set_recipe(&mut self, text: impl Into<String>) {
        self.recipe = text.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients_text(&self) -> &str {
        &self.ingredients_text
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    /// Builds the meal to submit.
    ///
    /// The id and availability of the meal being edited carry through
    /// unchanged; a new meal starts unavailable.
    pub fn build(&self) -> Result<Meal, SessionError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let mut meal = Meal::new(name)
            .with_available(self.available)
            .with_ingredients(split_ingredients(&self.ingredients_text))
            .with_recipe(self.recipe.clone());
        meal.id = self.meal_id.clone();
        Ok(meal)
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
