//! Terminal UI for recipebook using ratatui
//!
//! Recipe list on the left, details of the selected recipe on the right,
//! a filter field above the list and popup prompts for adding recipes.

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::collection::RecipeCollection;
use crate::config::PromptDefaults;
use crate::entry::{EntryStep, Prompt, PromptKind, RecipeEntry};
use crate::models::Recipe;

/// Main TUI application state
pub struct TuiApp {
    collection: RecipeCollection,
    /// Snapshot currently shown in the list
    displayed: Vec<Recipe>,
    list_state: ListState,
    should_quit: bool,
    // Filter field
    filter_input: String,
    applied_filter: Option<String>,
    editing_filter: bool,
    // Recipe entry popup
    entry: Option<RecipeEntry>,
    entry_input: String,
    defaults: PromptDefaults,
    status_message: Option<String>,
}

impl TuiApp {
    /// Create a new TUI application with an empty collection
    pub fn new(defaults: PromptDefaults) -> Self {
        Self {
            collection: RecipeCollection::new(),
            displayed: Vec::new(),
            list_state: ListState::default(),
            should_quit: false,
            filter_input: String::new(),
            applied_filter: None,
            editing_filter: false,
            entry: None,
            entry_input: String::new(),
            defaults,
            status_message: None,
        }
    }

    pub fn collection(&self) -> &RecipeCollection {
        &self.collection
    }

    pub fn displayed(&self) -> &[Recipe] {
        &self.displayed
    }

    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.list_state.selected().and_then(|i| self.displayed.get(i))
    }

    pub fn applied_filter(&self) -> Option<&str> {
        self.applied_filter.as_deref()
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn is_editing_filter(&self) -> bool {
        self.editing_filter
    }

    /// Prompt of the open entry popup, if any
    pub fn entry_prompt(&self) -> Option<Prompt> {
        self.entry.as_ref().and_then(RecipeEntry::prompt)
    }

    pub fn entry_input(&self) -> &str {
        &self.entry_input
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        tracing::info!("dashboard started");

        // Run event loop
        let res = self.run_app(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        tracing::info!(recipes = self.collection.len(), "dashboard closed");
        res
    }

    /// Main event loop
    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one key press to the application state
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        // Popup-specific keys first
        if self.entry.is_some() {
            self.handle_entry_key(key.code);
            return Ok(());
        }

        if self.editing_filter {
            self.handle_filter_key(key.code);
            return Ok(());
        }

        // Esc/Enter only close the status popup
        if self.status_message.take().is_some()
            && matches!(key.code, KeyCode::Esc | KeyCode::Enter)
        {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next_recipe();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous_recipe();
            }
            KeyCode::Char('a') => {
                self.open_entry();
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.editing_filter = true;
            }
            KeyCode::Char('c') => {
                self.filter_input.clear();
                self.applied_filter = None;
                self.refresh();
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                self.applied_filter = Some(self.filter_input.clone());
                self.editing_filter = false;
                self.refresh();
            }
            KeyCode::Esc => {
                self.filter_input = self.applied_filter.clone().unwrap_or_default();
                self.editing_filter = false;
            }
            KeyCode::Char(c) => self.filter_input.push(c),
            KeyCode::Backspace => {
                self.filter_input.pop();
            }
            _ => {}
        }
    }

    fn handle_entry_key(&mut self, code: KeyCode) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        let kind = entry.prompt().map(|p| p.kind);

        let step = match (kind, code) {
            (Some(PromptKind::Text), KeyCode::Char(c)) => {
                self.entry_input.push(c);
                return;
            }
            (Some(PromptKind::Text), KeyCode::Backspace) => {
                self.entry_input.pop();
                return;
            }
            (Some(PromptKind::Text), KeyCode::Enter) => {
                let input = std::mem::take(&mut self.entry_input);
                entry.submit(&input)
            }
            (Some(PromptKind::Text), KeyCode::Esc) => entry.dismiss(),
            (Some(PromptKind::YesNo), KeyCode::Char('y') | KeyCode::Enter) => entry.answer(true),
            (Some(PromptKind::YesNo), KeyCode::Char('n') | KeyCode::Esc) => entry.answer(false),
            _ => return,
        };

        if let Err(e) = step {
            self.status_message = Some(format!("⚠ {} (ingredient discarded)", e));
        }

        if entry.is_finished() {
            self.finish_entry();
        } else {
            self.entry_input = entry.prompt().map(|p| p.default).unwrap_or_default();
        }
    }

    fn open_entry(&mut self) {
        let entry = RecipeEntry::new(self.defaults.clone());
        self.entry_input = entry.prompt().map(|p| p.default).unwrap_or_default();
        self.entry = Some(entry);
    }

    fn finish_entry(&mut self) {
        self.entry_input.clear();
        let Some(entry) = self.entry.take() else {
            return;
        };
        let cancelled = entry.step() == EntryStep::Cancelled;

        match entry.finish() {
            Some(recipe) => {
                let name = recipe.name().to_string();
                let count = recipe.ingredients().len();
                self.collection.add(recipe);
                self.refresh();

                // The new recipe is last in the list when it passes the filter
                let last = self.displayed.len().checked_sub(1);
                if last.and_then(|i| self.displayed.get(i)) == self.collection.recipes().last() {
                    self.list_state.select(last);
                }

                if self.status_message.is_none() {
                    self.status_message =
                        Some(format!("✓ Added recipe: {} ({} ingredients)", name, count));
                }
            }
            None if cancelled => {
                self.status_message = Some("Cancelled".to_string());
            }
            None => {}
        }
    }

    /// Recompute the displayed snapshot from the collection
    fn refresh(&mut self) {
        self.displayed = match &self.applied_filter {
            Some(text) => self.collection.filter(text),
            None => self.collection.recipes().to_vec(),
        };

        if self.displayed.is_empty() {
            self.list_state.select(None);
        } else {
            let i = self
                .list_state
                .selected()
                .unwrap_or(0)
                .min(self.displayed.len() - 1);
            self.list_state.select(Some(i));
        }
    }

    fn next_recipe(&mut self) {
        if self.displayed.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.displayed.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_recipe(&mut self) {
        if self.displayed.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.displayed.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Draw the UI
    fn ui(&mut self, f: &mut Frame) {
        // Main layout: header, content, footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35), // Filter + list
                Constraint::Percentage(65), // Detail view
            ])
            .split(chunks[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(content_chunks[0]);

        self.render_filter(f, left[0]);
        self.render_recipe_list(f, left[1]);
        self.render_detail_view(f, content_chunks[1]);
        self.render_footer(f, chunks[2]);

        if let Some(prompt) = self.entry_prompt() {
            self.render_entry_popup(f, &prompt);
        } else if let Some(msg) = &self.status_message {
            self.render_status_message(f, msg);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Recipe Book")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(title, area);
    }

    fn render_filter(&self, f: &mut Frame, area: Rect) {
        let (style, title) = if self.editing_filter {
            (
                Style::default().fg(Color::Yellow),
                "Filter by ingredient (Enter to apply)",
            )
        } else {
            (Style::default().fg(Color::White), "Filter by ingredient")
        };

        let cursor = if self.editing_filter { "_" } else { "" };
        let field = Paragraph::new(format!("{}{}", self.filter_input, cursor))
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(field, area);
    }

    fn render_recipe_list(&mut self, f: &mut Frame, area: Rect) {
        let scope = match &self.applied_filter {
            Some(text) => format!(" ['{}']", text),
            None => " [all]".to_string(),
        };

        let items: Vec<ListItem> = self
            .displayed
            .iter()
            .map(|recipe| {
                ListItem::new(format!(
                    "{} ({} kcal)",
                    recipe.name(),
                    recipe.total_calories()
                ))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Recipes{} ({})", scope, self.displayed.len())),
            )
            .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_detail_view(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Details");

        let paragraph = match self.selected_recipe() {
            Some(recipe) => Paragraph::new(recipe.details()).wrap(Wrap { trim: false }),
            None => Paragraph::new("No recipe selected").style(Style::default().fg(Color::DarkGray)),
        };

        f.render_widget(paragraph.block(block), area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let keys = if self.entry.is_some() {
            "Enter: Submit | Esc: Cancel prompt | y/n: Answer"
        } else if self.editing_filter {
            "Type ingredient text | Enter: Apply | Esc: Cancel"
        } else {
            "a: Add recipe | /: Filter | c: Clear filter | ↑↓/jk: Navigate | q: Quit"
        };

        let footer = Paragraph::new(keys)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }

    fn render_entry_popup(&self, f: &mut Frame, prompt: &Prompt) {
        let area = centered_rect(50, 25, f.area());

        // Clear background
        f.render_widget(Clear, area);

        let body = match prompt.kind {
            PromptKind::Text => format!("{}\n\n{}_", prompt.label, self.entry_input),
            PromptKind::YesNo => format!("{}\n\n[y] Yes   [n] No", prompt.label),
        };

        let mut text = body;
        if let Some(recipe) = self.entry.as_ref().and_then(RecipeEntry::recipe) {
            text.push_str(&format!(
                "\n\n{}: {} ingredient(s) so far",
                recipe.name(),
                recipe.ingredients().len()
            ));
        }

        let popup = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(prompt.title)
                    .style(Style::default().bg(Color::Black)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(popup, area);
    }

    fn render_status_message(&self, f: &mut Frame, message: &str) {
        let area = centered_rect(50, 20, f.area());
        f.render_widget(Clear, area);

        let status = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true });
        f.render_widget(status, area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
