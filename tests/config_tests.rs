// Integration tests for configuration loading and first-time setup

use anyhow::Result;
use recipebook::commands;
use recipebook::config::{load_config_from, save_config_to, Config, RecipeBookPaths};
use recipebook::entry::RecipeEntry;
use std::fs;
use tempfile::TempDir;

fn setup() -> Result<(TempDir, RecipeBookPaths)> {
    let temp_dir = TempDir::new()?;
    let paths = RecipeBookPaths::at(temp_dir.path().join(".recipebook"));
    Ok((temp_dir, paths))
}

#[test]
fn test_missing_config_uses_defaults() -> Result<()> {
    let (_temp, paths) = setup()?;
    assert!(!paths.is_initialized());

    let config = load_config_from(&paths.config)?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_init_creates_layout_and_config() -> Result<()> {
    let (_temp, paths) = setup()?;
    commands::init_at(&paths)?;

    assert!(paths.is_initialized());
    assert!(paths.logs.is_dir());
    assert_eq!(load_config_from(&paths.config)?, Config::default());

    // Second run leaves an edited config alone
    fs::write(&paths.config, "[prompts]\ncalories = \"0\"\n")?;
    commands::init_at(&paths)?;
    assert_eq!(load_config_from(&paths.config)?.prompts.calories, "0");
    Ok(())
}

#[test]
fn test_saved_prompt_defaults_reach_entry() -> Result<()> {
    let (_temp, paths) = setup()?;
    paths.ensure_dirs()?;

    let mut config = Config::default();
    config.prompts.recipe_name = String::new();
    config.prompts.quantity = "4".to_string();
    config.logging.level = "debug".to_string();
    save_config_to(&config, &paths.config)?;

    let loaded = load_config_from(&paths.config)?;
    assert_eq!(loaded.logging.level, "debug");

    let mut entry = RecipeEntry::new(loaded.prompts);
    assert_eq!(entry.prompt().map(|p| p.default), Some(String::new()));
    entry.submit("Stew")?;
    entry.submit("Beef")?;
    assert_eq!(entry.prompt().map(|p| p.default), Some("4".to_string()));
    Ok(())
}

#[test]
fn test_malformed_config_is_an_error() -> Result<()> {
    let (_temp, paths) = setup()?;
    paths.ensure_dirs()?;
    fs::write(&paths.config, "[prompts\nquantity = 1")?;

    let err = load_config_from(&paths.config).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config.toml"));
    Ok(())
}
