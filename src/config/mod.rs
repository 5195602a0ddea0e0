//! Configuration management for recipebook
//!
//! Handles the ~/.recipebook/ directory structure and config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub prompts: PromptDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Text prefilled into each entry prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromptDefaults {
    pub recipe_name: String,
    pub ingredient_name: String,
    pub quantity: String,
    pub calories: String,
    pub food_group: String,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            recipe_name: "Recipe Name".to_string(),
            ingredient_name: "Ingredient Name".to_string(),
            quantity: "1".to_string(),
            calories: "100".to_string(),
            food_group: "Food Group".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, overridden by RECIPEBOOK_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Returns the path to the recipebook home directory (~/.recipebook)
pub fn recipebook_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".recipebook"))
}

/// Returns paths to all recipebook directories
pub struct RecipeBookPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub logs: PathBuf,
    pub log_file: PathBuf,
}

impl RecipeBookPaths {
    pub fn new() -> Result<Self> {
        Ok(Self::at(recipebook_home()?))
    }

    /// Layout rooted at an arbitrary directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join("config.toml"),
            logs: root.join("logs"),
            log_file: root.join("logs/recipebook.log"),
            root,
        }
    }

    /// Create all directories if they don't exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create recipebook root")?;
        fs::create_dir_all(&self.logs).context("Failed to create logs directory")?;
        Ok(())
    }

    /// Check if recipebook has been initialized
    pub fn is_initialized(&self) -> bool {
        self.config.exists()
    }
}

/// Load configuration from ~/.recipebook/config.toml, falling back to defaults
pub fn load_config() -> Result<Config> {
    let paths = RecipeBookPaths::new()?;
    load_config_from(&paths.config)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).context("Failed to read config.toml")?;
    toml::from_str(&content).context("Failed to parse config.toml")
}

/// Save configuration to disk
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).context("Failed to write config.toml")?;
    Ok(())
}
