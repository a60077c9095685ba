//! Persistent CLI configuration and database location.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aha_core::db::SqliteStorage;
use aha_core::deletion::{DeletionTimings, SystemClock};
use aha_core::Session;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const DB_PATH_ENV: &str = "AHA_DB_PATH";
const CONFIG_PATH_ENV: &str = "AHA_CONFIG_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub deletion: DeletionTimings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            db_path: None,
            deletion: DeletionTimings::default(),
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV).map_or_else(
        || {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("aha")
                .join(CONFIG_FILE_NAME)
        },
        PathBuf::from,
    )
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {error}", path.display()))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {error}", path.display()))?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {error}",
                    parent.display()
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let raw = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, raw)
            .map_err(|error| format!("Failed to write config at {}: {error}", path.display()))
    }

    fn normalize(&mut self) {
        if self.version == 0 {
            self.version = default_config_version();
        }
        self.db_path = self
            .db_path
            .take()
            .filter(|path| !path.as_os_str().is_empty());
    }
}

/// Database path precedence: `--db-path`, then `AHA_DB_PATH`, then the config
/// file, then the platform data directory.
pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config: &CliConfig) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os(DB_PATH_ENV).map(PathBuf::from))
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aha")
        .join("aha.db")
}

/// Open a session on the SQLite store at `db_path`
pub fn open_session(db_path: &Path, timings: DeletionTimings) -> Result<Session, CliError> {
    let storage = SqliteStorage::open(db_path)?;
    let session = Session::with_clock(Arc::new(storage), SystemClock, timings)?;
    tracing::debug!("Opened session on {}", db_path.display());
    Ok(session)
}

/// Print the first-run greeting once, then remember that it was shown
pub fn greet_first_run(session: &mut Session) -> Result<(), CliError> {
    if !session.show_welcome() {
        return Ok(());
    }

    eprintln!("Welcome to Aha. Capture the gist of an insight now, add the details later.");
    eprintln!("Try: aha \"an idea worth keeping\"");
    session.dismiss_welcome()?;
    Ok(())
}
