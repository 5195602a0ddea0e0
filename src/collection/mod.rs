//! In-memory recipe collection
//!
//! Append-only ordered list of recipes with a case-insensitive
//! ingredient-name filter. Filtering never touches the stored list.

use crate::models::Recipe;

/// Ordered, append-only set of recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
}

impl RecipeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipe to the end of the collection
    pub fn add(&mut self, recipe: Recipe) {
        tracing::debug!(
            recipe = %recipe.name(),
            ingredients = recipe.ingredients().len(),
            position = self.recipes.len(),
            "recipe added"
        );
        self.recipes.push(recipe);
    }

    /// Recipes with at least one ingredient whose name contains `substring`.
    ///
    /// Matching ignores case. An empty `substring` matches every ingredient,
    /// so `filter("")` yields all recipes that have ingredients. The result
    /// is a fresh snapshot in collection order.
    pub fn filter(&self, substring: &str) -> Vec<Recipe> {
        let matched: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|r| r.has_ingredient_matching(substring))
            .cloned()
            .collect();

        tracing::debug!(
            substring,
            matched = matched.len(),
            total = self.recipes.len(),
            "recipes filtered"
        );
        matched
    }

    /// Everything added so far, in insertion order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Extend<Recipe> for RecipeCollection {
    fn extend<T: IntoIterator<Item = Recipe>>(&mut self, iter: T) {
        for recipe in iter {
            self.add(recipe);
        }
    }
}
