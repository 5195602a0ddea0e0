//! Step-by-step recipe entry
//!
//! Front ends collect a recipe one prompt at a time:
//! - recipe name (empty cancels the whole entry)
//! - ingredient name (empty finishes the recipe)
//! - quantity, calories (must parse as whole numbers)
//! - food group
//! - "add another ingredient?"
//!
//! A malformed number drops the ingredient being typed and finishes the
//! recipe with whatever was collected before it.

use crate::config::PromptDefaults;
use crate::models::{Ingredient, Recipe};

/// Where an entry currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStep {
    RecipeName,
    IngredientName,
    Quantity,
    Calories,
    FoodGroup,
    AnotherIngredient,
    Complete,
    Cancelled,
}

impl std::fmt::Display for EntryStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStep::RecipeName => write!(f, "recipe_name"),
            EntryStep::IngredientName => write!(f, "ingredient_name"),
            EntryStep::Quantity => write!(f, "quantity"),
            EntryStep::Calories => write!(f, "calories"),
            EntryStep::FoodGroup => write!(f, "food_group"),
            EntryStep::AnotherIngredient => write!(f, "another_ingredient"),
            EntryStep::Complete => write!(f, "complete"),
            EntryStep::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Which integer field is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Quantity,
    Calories,
}

/// Entry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("Invalid quantity '{0}': expected a whole number")]
    InvalidQuantity(String),

    #[error("Invalid calories '{0}': expected a whole number")]
    InvalidCalories(String),

    #[error("No text input expected at step {step}")]
    UnexpectedInput { step: EntryStep },

    #[error("Step {step} is not a yes/no question")]
    NotAQuestion { step: EntryStep },
}

/// Parse a quantity or calorie count the way an integer text box would
pub fn parse_amount(field: Amount, input: &str) -> Result<i32, EntryError> {
    input.trim().parse::<i32>().map_err(|_| match field {
        Amount::Quantity => EntryError::InvalidQuantity(input.to_string()),
        Amount::Calories => EntryError::InvalidCalories(input.to_string()),
    })
}

/// Kind of answer a prompt expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    YesNo,
}

/// One question to put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub label: &'static str,
    /// Prefilled answer (empty for yes/no questions)
    pub default: String,
    pub kind: PromptKind,
}

/// Ingredient fields typed so far
#[derive(Debug, Clone, Default)]
struct PendingIngredient {
    name: String,
    quantity: i32,
    calories: i32,
}

/// A recipe being collected from sequential prompts
#[derive(Debug, Clone)]
pub struct RecipeEntry {
    step: EntryStep,
    recipe: Option<Recipe>,
    pending: Option<PendingIngredient>,
    defaults: PromptDefaults,
}

impl RecipeEntry {
    pub fn new(defaults: PromptDefaults) -> Self {
        Self {
            step: EntryStep::RecipeName,
            recipe: None,
            pending: None,
            defaults,
        }
    }

    pub fn step(&self) -> EntryStep {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.step, EntryStep::Complete | EntryStep::Cancelled)
    }

    /// Recipe collected so far, if a name has been given
    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    /// The question for the current step, or `None` once finished
    pub fn prompt(&self) -> Option<Prompt> {
        let text = |title, label, default: &str| Prompt {
            title,
            label,
            default: default.to_string(),
            kind: PromptKind::Text,
        };

        match self.step {
            EntryStep::RecipeName => Some(text(
                "Add Recipe",
                "Enter Recipe Name:",
                self.defaults.recipe_name.as_str(),
            )),
            EntryStep::IngredientName => Some(text(
                "Add Ingredient",
                "Enter Ingredient Name:",
                self.defaults.ingredient_name.as_str(),
            )),
            EntryStep::Quantity => Some(text(
                "Add Ingredient",
                "Enter Quantity:",
                self.defaults.quantity.as_str(),
            )),
            EntryStep::Calories => Some(text(
                "Add Ingredient",
                "Enter Calories:",
                self.defaults.calories.as_str(),
            )),
            EntryStep::FoodGroup => Some(text(
                "Add Ingredient",
                "Enter Food Group:",
                self.defaults.food_group.as_str(),
            )),
            EntryStep::AnotherIngredient => Some(Prompt {
                title: "Add Ingredient",
                label: "Add another ingredient?",
                default: String::new(),
                kind: PromptKind::YesNo,
            }),
            EntryStep::Complete | EntryStep::Cancelled => None,
        }
    }

    /// Feed the answer to the current text prompt.
    ///
    /// A malformed quantity or calorie count finishes the entry (the
    /// half-typed ingredient is dropped) and reports why.
    pub fn submit(&mut self, input: &str) -> Result<EntryStep, EntryError> {
        match self.step {
            EntryStep::RecipeName => {
                if input.is_empty() {
                    self.step = EntryStep::Cancelled;
                } else {
                    self.recipe = Some(Recipe::new(input));
                    self.step = EntryStep::IngredientName;
                }
            }
            EntryStep::IngredientName => {
                if input.is_empty() {
                    self.step = EntryStep::Complete;
                } else {
                    self.pending = Some(PendingIngredient {
                        name: input.to_string(),
                        ..Default::default()
                    });
                    self.step = EntryStep::Quantity;
                }
            }
            EntryStep::Quantity => {
                let quantity = self.parse_or_abort(Amount::Quantity, input)?;
                if let Some(pending) = self.pending.as_mut() {
                    pending.quantity = quantity;
                }
                self.step = EntryStep::Calories;
            }
            EntryStep::Calories => {
                let calories = self.parse_or_abort(Amount::Calories, input)?;
                if let Some(pending) = self.pending.as_mut() {
                    pending.calories = calories;
                }
                self.step = EntryStep::FoodGroup;
            }
            EntryStep::FoodGroup => {
                if let (Some(pending), Some(recipe)) = (self.pending.take(), self.recipe.as_mut()) {
                    recipe.add_ingredient(Ingredient::new(
                        pending.name,
                        pending.quantity,
                        pending.calories,
                        input,
                    ));
                }
                self.step = EntryStep::AnotherIngredient;
            }
            step => return Err(EntryError::UnexpectedInput { step }),
        }
        Ok(self.step)
    }

    /// Answer the "add another ingredient?" question
    pub fn answer(&mut self, another: bool) -> Result<EntryStep, EntryError> {
        if self.step != EntryStep::AnotherIngredient {
            return Err(EntryError::NotAQuestion { step: self.step });
        }
        self.step = if another {
            EntryStep::IngredientName
        } else {
            EntryStep::Complete
        };
        Ok(self.step)
    }

    /// Dismiss the current prompt as a closed dialog would
    pub fn dismiss(&mut self) -> Result<EntryStep, EntryError> {
        match self.step {
            EntryStep::AnotherIngredient => self.answer(false),
            _ => self.submit(""),
        }
    }

    /// Consume the entry, yielding the recipe if it was completed
    pub fn finish(self) -> Option<Recipe> {
        match self.step {
            EntryStep::Complete => self.recipe,
            _ => None,
        }
    }

    fn parse_or_abort(&mut self, field: Amount, input: &str) -> Result<i32, EntryError> {
        parse_amount(field, input).map_err(|e| {
            let dropped = self.pending.take().map(|p| p.name).unwrap_or_default();
            tracing::warn!(ingredient = %dropped, error = %e, "ingredient entry aborted");
            self.step = EntryStep::Complete;
            e
        })
    }
}
