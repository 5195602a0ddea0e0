// Integration tests for the shell front end
// Drives /add through a scripted prompter and checks list/filter/show output

use anyhow::Result;
use recipebook::config::PromptDefaults;
use recipebook::entry::{EntryError, Prompt};
use recipebook::shell::{collect_recipe, Prompter, ShellCommand, ShellSession};
use std::collections::VecDeque;

/// Answers prompts from a fixed script; `None` means "dismissed"
#[derive(Default)]
struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: &[Option<&str>], confirms: &[bool]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
            confirms: confirms.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>> {
        self.asked.push(prompt.label.to_string());
        Ok(self.answers.pop_front().unwrap_or(None))
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.asked.push(prompt.label.to_string());
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}

fn run(session: &mut ShellSession, line: &str, prompter: &mut ScriptedPrompter) -> Result<String> {
    let command: ShellCommand = line.parse().map_err(anyhow::Error::msg)?;
    let mut out = Vec::new();
    session.execute(command, prompter, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn add(session: &mut ShellSession, answers: &[Option<&str>], confirms: &[bool]) -> Result<String> {
    let mut prompter = ScriptedPrompter::new(answers, confirms);
    run(session, "/add", &mut prompter)
}

#[test]
fn test_collect_recipe_prompt_sequence() -> Result<()> {
    let mut prompter = ScriptedPrompter::new(
        &[Some("Cake"), Some("Flour"), Some("2"), Some("200"), Some("Grain"), None],
        &[true],
    );

    let outcome = collect_recipe(&mut prompter, &PromptDefaults::default())?;
    let recipe = outcome.recipe.expect("recipe completed");

    assert_eq!(recipe.name(), "Cake");
    assert_eq!(recipe.ingredients().len(), 1);
    assert!(outcome.notice.is_none());
    assert_eq!(
        prompter.asked,
        vec![
            "Enter Recipe Name:",
            "Enter Ingredient Name:",
            "Enter Quantity:",
            "Enter Calories:",
            "Enter Food Group:",
            "Add another ingredient?",
            "Enter Ingredient Name:",
        ]
    );
    Ok(())
}

#[test]
fn test_collect_recipe_bad_calories_reports_notice() -> Result<()> {
    let mut prompter = ScriptedPrompter::new(
        &[Some("Soup"), Some("Carrot"), Some("1"), Some("lots")],
        &[],
    );

    let outcome = collect_recipe(&mut prompter, &PromptDefaults::default())?;

    assert_eq!(outcome.notice, Some(EntryError::InvalidCalories("lots".to_string())));
    let recipe = outcome.recipe.expect("recipe kept");
    assert_eq!(recipe.name(), "Soup");
    assert!(recipe.ingredients().is_empty());
    Ok(())
}

#[test]
fn test_dismissed_recipe_name_adds_nothing() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    let out = add(&mut session, &[None], &[])?;

    assert!(out.contains("Cancelled."));
    assert!(session.collection().is_empty());
    Ok(())
}

#[test]
fn test_add_filter_and_show() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    add(
        &mut session,
        &[Some("Cake"), Some("Flour"), Some("2"), Some("200"), Some("Grain")],
        &[false],
    )?;
    add(
        &mut session,
        &[Some("Salad"), Some("Lettuce"), Some("1"), Some("15"), Some("Vegetable")],
        &[false],
    )?;

    let mut idle = ScriptedPrompter::default();
    let listed = run(&mut session, "/list", &mut idle)?;
    assert!(listed.contains("Recipes [all] (2)"));
    assert!(listed.contains("1. Cake (1 ingredients, 200 kcal)"));

    let filtered = run(&mut session, "/filter FLO", &mut idle)?;
    assert!(filtered.contains("(1)"));
    assert_eq!(session.active_filter(), Some("FLO"));
    assert_eq!(session.displayed().len(), 1);

    let shown = run(&mut session, "/show 1", &mut idle)?;
    assert_eq!(shown, "Recipe: Cake\nIngredients:\nFlour: 2 Grain, Calories: 200\n");

    let missing = run(&mut session, "/show 2", &mut idle)?;
    assert!(missing.contains("No recipe #2"));

    run(&mut session, "/clear", &mut idle)?;
    assert_eq!(session.displayed().len(), 2);
    Ok(())
}

#[test]
fn test_new_recipe_respects_active_filter() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    let mut idle = ScriptedPrompter::default();
    run(&mut session, "/filter egg", &mut idle)?;

    add(
        &mut session,
        &[Some("Toast"), Some("Bread"), Some("1"), Some("80"), Some("Grain")],
        &[false],
    )?;
    assert_eq!(session.collection().len(), 1);
    assert!(session.displayed().is_empty());

    add(
        &mut session,
        &[Some("Omelette"), Some("Egg"), Some("3"), Some("210"), Some("Protein")],
        &[false],
    )?;
    assert_eq!(session.displayed().len(), 1);
    assert_eq!(session.displayed()[0].name(), "Omelette");
    Ok(())
}

#[test]
fn test_empty_filter_hides_recipes_without_ingredients() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    add(&mut session, &[Some("Water"), Some("")], &[])?;

    let mut idle = ScriptedPrompter::default();
    run(&mut session, "/list", &mut idle)?;
    assert_eq!(session.displayed().len(), 1);

    let out = run(&mut session, "/filter", &mut idle)?;
    assert!(out.contains("(none)"));
    assert!(session.displayed().is_empty());
    Ok(())
}

#[test]
fn test_json_dump_of_displayed_recipes() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    add(
        &mut session,
        &[Some("Cake"), Some("Flour"), Some("2"), Some("200"), Some("Grain")],
        &[false],
    )?;

    let mut idle = ScriptedPrompter::default();
    let out = run(&mut session, "/json", &mut idle)?;
    let value: serde_json::Value = serde_json::from_str(&out)?;

    assert_eq!(value[0]["name"], "Cake");
    assert_eq!(value[0]["ingredients"][0]["food_group"], "Grain");
    assert_eq!(value[0]["ingredients"][0]["calories"], 200);
    Ok(())
}

#[test]
fn test_exit_ends_session() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    let mut idle = ScriptedPrompter::default();
    let mut out = Vec::new();
    assert!(session.execute(ShellCommand::Exit, &mut idle, &mut out)?);
    assert!(!session.execute(ShellCommand::Help, &mut idle, &mut out)?);
    Ok(())
}

#[test]
fn test_filter_text_keeps_surrounding_spaces() -> Result<()> {
    let mut session = ShellSession::new(PromptDefaults::default());
    add(
        &mut session,
        &[Some("Latte"), Some("Whole Milk"), Some("1"), Some("150"), Some("Dairy")],
        &[false],
    )?;
    add(
        &mut session,
        &[Some("Shake"), Some("Milk"), Some("1"), Some("120"), Some("Dairy")],
        &[false],
    )?;

    let mut idle = ScriptedPrompter::default();
    run(&mut session, "/filter  milk", &mut idle)?;
    assert_eq!(session.active_filter(), Some(" milk"));
    assert_eq!(session.displayed().len(), 1);
    assert_eq!(session.displayed()[0].name(), "Latte");
    Ok(())
}
