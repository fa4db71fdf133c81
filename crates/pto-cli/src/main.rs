use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pto_cli::commands::{breaks, history, stats, status};
use pto_cli::{Cli, Commands, Config};
use pto_core::SessionStore;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(pto_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = pto_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with the live timer line
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout();
    match &cli.command {
        Some(Commands::Break(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let mut store = SessionStore::load(db);
            breaks::run(&mut stdout, &mut store, args, &config)?;
        }
        Some(Commands::History(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let store = SessionStore::load(db);
            history::run(&mut stdout, &store, args, &config.currency_symbol)?;
        }
        Some(Commands::Stats { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let store = SessionStore::load(db);
            stats::run(&mut stdout, &store, *json, &config.currency_symbol)?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, db, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
