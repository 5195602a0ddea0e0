//! Interactive readline shell
//!
//! Line-oriented front end over the recipe collection. Recipe entry asks
//! one question per line through a [`Prompter`].

use anyhow::{bail, Context, Result};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::Write;

use crate::collection::RecipeCollection;
use crate::config::PromptDefaults;
use crate::entry::{EntryError, Prompt, PromptKind, RecipeEntry};
use crate::models::Recipe;

/// Asks the user one question at a time
pub trait Prompter {
    /// Text answer, or `None` if the user dismissed the prompt
    fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>>;

    /// Yes/no answer
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;
}

/// Result of one recipe entry run
#[derive(Debug, Default)]
pub struct EntryOutcome {
    pub recipe: Option<Recipe>,
    /// Set when a malformed number cut ingredient entry short
    pub notice: Option<EntryError>,
}

/// Drive a [`RecipeEntry`] to completion with the given prompter
pub fn collect_recipe<P: Prompter + ?Sized>(
    prompter: &mut P,
    defaults: &PromptDefaults,
) -> Result<EntryOutcome> {
    let mut entry = RecipeEntry::new(defaults.clone());
    let mut notice = None;

    while let Some(prompt) = entry.prompt() {
        let step = match prompt.kind {
            PromptKind::Text => match prompter.ask(&prompt)? {
                Some(answer) => entry.submit(&answer),
                None => entry.dismiss(),
            },
            PromptKind::YesNo => {
                let another = prompter.confirm(&prompt)?;
                entry.answer(another)
            }
        };

        match step {
            Ok(_) => {}
            Err(e @ (EntryError::InvalidQuantity(_) | EntryError::InvalidCalories(_))) => {
                notice = Some(e);
            }
            Err(e) => bail!(e),
        }
    }

    Ok(EntryOutcome {
        recipe: entry.finish(),
        notice,
    })
}

/// Prompter backed by a rustyline editor
pub struct ReadlinePrompter<'a> {
    editor: &'a mut DefaultEditor,
}

impl<'a> ReadlinePrompter<'a> {
    pub fn new(editor: &'a mut DefaultEditor) -> Self {
        Self { editor }
    }
}

impl Prompter for ReadlinePrompter<'_> {
    fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>> {
        let label = format!("[{}] {} ", prompt.title, prompt.label);
        match self.editor.readline_with_initial(&label, (prompt.default.as_str(), "")) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err).context("Failed to read input"),
        }
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let label = format!("[{}] {} [y/N] ", prompt.title, prompt.label);
        match self.editor.readline(&label) {
            Ok(line) => Ok(is_yes(&line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
            Err(err) => Err(err).context("Failed to read input"),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add,
    List,
    Filter(String),
    Clear,
    /// 1-based position in the displayed list
    Show(usize),
    Json,
    Help,
    Exit,
}

impl std::str::FromStr for ShellCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Filter text is kept verbatim, spaces included
        let (name, raw) = s.split_once(' ').unwrap_or((s, ""));
        let arg = raw.trim();

        match name {
            "/add" => Ok(ShellCommand::Add),
            "/list" => Ok(ShellCommand::List),
            "/filter" => Ok(ShellCommand::Filter(raw.to_string())),
            "/clear" => Ok(ShellCommand::Clear),
            "/show" => arg
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(ShellCommand::Show)
                .ok_or_else(|| format!("Usage: /show <n> (got '{}')", arg)),
            "/json" => Ok(ShellCommand::Json),
            "/help" => Ok(ShellCommand::Help),
            "/exit" | "/quit" => Ok(ShellCommand::Exit),
            _ => Err(format!("Unknown command: {}. Type /help for commands", name)),
        }
    }
}

/// Shell state: the collection plus what is currently displayed
pub struct ShellSession {
    collection: RecipeCollection,
    displayed: Vec<Recipe>,
    filter: Option<String>,
    defaults: PromptDefaults,
}

impl ShellSession {
    pub fn new(defaults: PromptDefaults) -> Self {
        Self {
            collection: RecipeCollection::new(),
            displayed: Vec::new(),
            filter: None,
            defaults,
        }
    }

    pub fn collection(&self) -> &RecipeCollection {
        &self.collection
    }

    /// Recipes currently shown by /list
    pub fn displayed(&self) -> &[Recipe] {
        &self.displayed
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Start the interactive loop
    pub fn run(&mut self) -> Result<()> {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║  Recipe Book Shell                                            ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        print_help(&mut std::io::stdout())?;
        tracing::info!("shell session started");

        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("recipebook> ") {
                Ok(line) => {
                    let trimmed = line.trim_start();

                    if trimmed.trim_end().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    if !trimmed.starts_with('/') {
                        println!("Commands start with '/'. Type /help for a list.");
                        continue;
                    }

                    let command = match trimmed.parse::<ShellCommand>() {
                        Ok(command) => command,
                        Err(e) => {
                            println!("✗ {}", e);
                            continue;
                        }
                    };

                    let mut prompter = ReadlinePrompter::new(&mut rl);
                    match self.execute(command, &mut prompter, &mut std::io::stdout()) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => println!("✗ Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted. Use /exit to quit.");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("EOF");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        tracing::info!(recipes = self.collection.len(), "shell session ended");
        println!("\nSession ended.");
        Ok(())
    }

    /// Execute one command. Returns true when the session should end.
    pub fn execute<P: Prompter + ?Sized, W: Write>(
        &mut self,
        command: ShellCommand,
        prompter: &mut P,
        out: &mut W,
    ) -> Result<bool> {
        match command {
            ShellCommand::Add => {
                let outcome = collect_recipe(prompter, &self.defaults)?;
                if let Some(notice) = &outcome.notice {
                    writeln!(out, "⚠️  {} (ingredient discarded)", notice)?;
                }
                match outcome.recipe {
                    Some(recipe) => {
                        writeln!(
                            out,
                            "✓ Added recipe: {} ({} ingredients)",
                            recipe.name(),
                            recipe.ingredients().len()
                        )?;
                        self.collection.add(recipe);
                        self.refresh();
                    }
                    None => writeln!(out, "Cancelled.")?,
                }
            }
            ShellCommand::List => {
                self.print_list(out)?;
            }
            ShellCommand::Filter(text) => {
                self.filter = Some(text);
                self.refresh();
                self.print_list(out)?;
            }
            ShellCommand::Clear => {
                self.filter = None;
                self.refresh();
                self.print_list(out)?;
            }
            ShellCommand::Show(n) => match n.checked_sub(1).and_then(|i| self.displayed.get(i)) {
                Some(recipe) => writeln!(out, "{}", recipe.details())?,
                None => writeln!(
                    out,
                    "No recipe #{} (showing {})",
                    n,
                    self.displayed.len()
                )?,
            },
            ShellCommand::Json => {
                let json = serde_json::to_string_pretty(&self.displayed)
                    .context("Failed to serialize recipes")?;
                writeln!(out, "{}", json)?;
            }
            ShellCommand::Help => print_help(out)?,
            ShellCommand::Exit => return Ok(true),
        }
        Ok(false)
    }

    /// Recompute the displayed snapshot from the collection
    fn refresh(&mut self) {
        self.displayed = match &self.filter {
            Some(text) => self.collection.filter(text),
            None => self.collection.recipes().to_vec(),
        };
    }

    fn print_list<W: Write>(&self, out: &mut W) -> Result<()> {
        let scope = match &self.filter {
            Some(text) => format!("ingredient contains '{}'", text),
            None => "all".to_string(),
        };
        writeln!(out, "Recipes [{}] ({})", scope, self.displayed.len())?;

        if self.displayed.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for (i, recipe) in self.displayed.iter().enumerate() {
            writeln!(
                out,
                "  {:>2}. {} ({} ingredients, {} kcal)",
                i + 1,
                recipe.name(),
                recipe.ingredients().len(),
                recipe.total_calories()
            )?;
        }
        Ok(())
    }
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  /add            - Add a recipe (prompts for each ingredient)")?;
    writeln!(out, "  /list           - List displayed recipes")?;
    writeln!(out, "  /filter [text]  - Show recipes with an ingredient containing text")?;
    writeln!(out, "  /clear          - Clear the filter")?;
    writeln!(out, "  /show <n>       - Show details of recipe n")?;
    writeln!(out, "  /json           - Dump displayed recipes as JSON")?;
    writeln!(out, "  /exit           - Exit session")?;
    writeln!(out)?;
    Ok(())
}
