//! CLI commands for recipebook

use anyhow::{Context, Result};

use crate::config::{load_config_from, save_config_to, Config, RecipeBookPaths};

/// Initialize recipebook for first-time setup
pub fn init() -> Result<()> {
    let paths = RecipeBookPaths::new()?;
    init_at(&paths)
}

pub fn init_at(paths: &RecipeBookPaths) -> Result<()> {
    if paths.is_initialized() {
        println!("Recipe book is already initialized at {}", paths.root.display());
        return Ok(());
    }

    println!("Initializing recipe book at {}...", paths.root.display());

    paths.ensure_dirs()?;
    println!("  Created directory structure");

    save_config_to(&Config::default(), &paths.config)?;
    println!("  Created config.toml");

    println!();
    println!("Recipe book initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  recipebook tui      Open the dashboard");
    println!("  recipebook shell    Start the interactive shell");

    Ok(())
}

/// Print the effective configuration
pub fn show_config() -> Result<()> {
    let paths = RecipeBookPaths::new()?;
    let config = load_config_from(&paths.config)?;

    if paths.is_initialized() {
        println!("# {}", paths.config.display());
    } else {
        println!("# {} (not found, showing defaults)", paths.config.display());
    }
    let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", content);

    Ok(())
}
