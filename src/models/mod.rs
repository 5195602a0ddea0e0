//! Data models for recipebook
//!
//! A recipe is a name plus an ordered list of ingredients.
//! Ingredients are immutable once built.

use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    name: String,
    quantity: i32,
    calories: i32,
    food_group: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: i32,
        calories: i32,
        food_group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            calories,
            food_group: food_group.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn calories(&self) -> i32 {
        self.calories
    }

    pub fn food_group(&self) -> &str {
        &self.food_group
    }

    /// Detail view line: `Name: Quantity FoodGroup, Calories: Calories`
    pub fn detail_line(&self) -> String {
        self.to_string()
    }

    /// Case-insensitive ordinal substring match on the ingredient name
    pub fn name_contains(&self, needle: &str) -> bool {
        contains_ignore_case(&self.name, needle)
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {}, Calories: {}",
            self.name, self.quantity, self.food_group, self.calories
        )
    }
}

/// A named, ordered collection of ingredients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Create an empty recipe with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Append an ingredient, keeping insertion order (duplicates allowed)
    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    /// Builder-style variant of `add_ingredient`
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.add_ingredient(ingredient);
        self
    }

    /// True if any ingredient name contains `needle`, ignoring case
    pub fn has_ingredient_matching(&self, needle: &str) -> bool {
        self.ingredients.iter().any(|i| i.name_contains(needle))
    }

    pub fn total_calories(&self) -> i64 {
        self.ingredients.iter().map(|i| i64::from(i.calories)).sum()
    }

    /// Text shown in the detail view for the selected recipe
    pub fn details(&self) -> String {
        let lines: Vec<String> = self.ingredients.iter().map(Ingredient::detail_line).collect();
        format!("Recipe: {}\nIngredients:\n{}", self.name, lines.join("\n"))
    }
}

/// Ordinal substring match, folding each code point on its own
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack: Vec<char> = haystack.chars().map(fold_char).collect();
    let needle: Vec<char> = needle.chars().map(fold_char).collect();
    haystack.windows(needle.len()).any(|w| w == needle.as_slice())
}

/// Simple uppercase mapping; code points whose uppercase spans several
/// chars (e.g. 'ß') fold to themselves
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
