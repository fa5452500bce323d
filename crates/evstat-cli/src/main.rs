use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use evstat_cli::commands::{add, events, status};
use evstat_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<evstat_db::Database> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    evstat_db::Database::open(&config.database_path).context("failed to open database")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Commands::Status { group_id, at, json }) => {
            let db = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &db, &group_id, at, json)?;
        }
        Some(Commands::Add {
            group_id,
            end,
            review_hours,
            id,
        }) => {
            let db = open_database(cli.config.as_deref())?;
            let event = add::NewEvent {
                group_id,
                end,
                review_hours,
                id,
            };
            add::run(&mut stdout, &db, event, chrono::Utc::now())?;
        }
        Some(Commands::Events { group_id, json }) => {
            let db = open_database(cli.config.as_deref())?;
            events::run(&mut stdout, &db, &group_id, json)?;
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
