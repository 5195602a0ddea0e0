//! recipebook - record recipes and filter them by ingredient

use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use recipebook::{commands, config, shell, tui};

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(author, version, about = "Record recipes and filter them by ingredient")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize recipebook (writes ~/.recipebook/config.toml)
    Init,

    /// Launch the TUI dashboard
    Tui,

    /// Start the interactive shell
    Shell,

    /// Show the effective configuration
    Config,
}

/// Log to ~/.recipebook/logs; the dashboard owns the terminal, so never stdout
fn init_tracing(config: &config::Config) {
    let env_filter = EnvFilter::try_from_env("RECIPEBOOK_LOG")
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = config::RecipeBookPaths::new().ok().and_then(|paths| {
        paths.ensure_dirs().ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&paths.log_file)
            .ok()
            .map(|file| (paths.log_file, file))
    });

    match log_file {
        Some((path, file)) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::debug!(path = %path.display(), "logging initialized");
        }
        // No log file: stay silent rather than draw over the UI
        None => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config()?;
    init_tracing(&config);

    match cli.command {
        Commands::Init => {
            commands::init()?;
        }
        Commands::Tui => {
            let mut app = tui::TuiApp::new(config.prompts);
            app.run()?;
        }
        Commands::Shell => {
            let mut session = shell::ShellSession::new(config.prompts);
            session.run()?;
        }
        Commands::Config => {
            commands::show_config()?;
        }
    }

    Ok(())
}
