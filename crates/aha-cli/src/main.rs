//! Aha CLI - capture the gist of an insight from the terminal
//!
//! Quick capture first, details later.

mod cli;
mod commands;
mod config;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::details::run_details;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::reset::{run_clear, run_reset};
use crate::commands::search::run_search;
use crate::commands::settings::run_settings;
use crate::commands::show::run_show;
use crate::config::{greet_first_run, open_session, resolve_db_path, CliConfig};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load().map_err(CliError::Config)?;

    let command = match cli.command {
        Some(Commands::Completions { shell, output }) => {
            return run_completions(shell, output.as_deref());
        }
        Some(Commands::Config { command }) => return run_config(command, &config),
        None if cli.gist.is_empty() => {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
        command => command,
    };

    let db_path = resolve_db_path(cli.db_path, &config);
    let mut session = open_session(&db_path, config.deletion)?;
    greet_first_run(&mut session)?;

    match command {
        Some(Commands::Add { gist, details }) => {
            run_add(&mut session, &gist, details.as_deref())?;
        }
        Some(Commands::List { limit, query, json }) => {
            run_list(&mut session, limit, query.as_deref(), json)?;
        }
        Some(Commands::Search { query, limit, json }) => {
            run_search(&mut session, &query, limit, json)?;
        }
        Some(Commands::Show { id, json }) => {
            run_show(&mut session, &id, json)?;
        }
        Some(Commands::Details { id, text }) => {
            run_details(&mut session, &id, text.as_deref())?;
        }
        Some(Commands::Delete { id, query }) => {
            run_delete(&mut session, &id, query.as_deref()).await?;
        }
        Some(Commands::Export { format, output }) => {
            run_export(&session, format, output.as_deref())?;
        }
        Some(Commands::Import { path }) => {
            run_import(&mut session, &path)?;
        }
        Some(Commands::Settings { command }) => {
            run_settings(&mut session, command)?;
        }
        Some(Commands::Clear { yes }) => run_clear(&mut session, yes)?,
        Some(Commands::Reset { yes }) => run_reset(&mut session, yes)?,
        // Handled before the session is opened
        Some(Commands::Completions { .. } | Commands::Config { .. }) => {}
        // Quick capture mode: aha "my insight"
        None => {
            run_add(&mut session, &cli.gist, None)?;
        }
    }

    Ok(())
}
