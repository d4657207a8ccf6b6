use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pagesmith_config::{AppConfig, PageStore};
use pagesmith_core::EditorStore;

mod commands;

use commands::Command;

/// Edit a block-based page from the command line.
#[derive(Parser, Debug)]
#[command(name = "pagesmith", version, about)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from a fresh page when the saved one cannot be read.
    /// The unreadable page is overwritten by the next save.
    #[arg(long, global = true)]
    discard_saved: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_or_create(&config_path);
    tracing::debug!("Using config at {}", config_path.display());

    let db_path = config.page_db_path();
    let pages = PageStore::open(&db_path)
        .with_context(|| format!("Failed to open page store at {}", db_path.display()))?;

    let mut store = if cli.command.needs_page() {
        commands::open_session(config, &pages, cli.discard_saved)?
    } else {
        EditorStore::without_page(config)
    };

    let mutates = cli.command.mutates();
    let stdout = std::io::stdout();
    commands::run(cli.command, &mut store, &pages, &mut stdout.lock())?;

    if mutates {
        store.save_page(&pages)?;
    }
    Ok(())
}
