use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, resolve_db_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, config: &CliConfig) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            println!("config: {}", default_config_path().display());
            println!("database: {}", resolve_db_path(None, config).display());
            println!("deletion: {}", serde_json::to_string(&config.deletion)?);
        }
        ConfigCommands::Path => println!("{}", default_config_path().display()),
        ConfigCommands::SetDbPath { path } => {
            let saved = set_db_path(config, &path, &default_config_path())?;
            println!("{}", saved.db_path.unwrap_or_default().display());
        }
    }

    Ok(())
}

/// Persist `db_path` as the default database location
pub fn set_db_path(
    config: &CliConfig,
    db_path: &Path,
    config_path: &Path,
) -> Result<CliConfig, CliError> {
    let mut updated = config.clone();
    updated.db_path = Some(db_path.to_path_buf());
    updated.save_to_path(config_path).map_err(CliError::Config)?;
    tracing::info!("Saved database path to {}", config_path.display());
    CliConfig::load_from_path(config_path).map_err(CliError::Config)
}
