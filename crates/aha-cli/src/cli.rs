use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "aha")]
#[command(about = "Capture the gist of an insight from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Quick capture: aha "my insight here"
    #[arg(trailing_var_arg = true)]
    pub gist: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a new gist
    #[command(alias = "new")]
    Add {
        /// Gist text
        gist: Vec<String>,
        /// Elaborate right away
        #[arg(short, long, value_name = "TEXT")]
        details: Option<String>,
    },
    /// Browse note history, newest first
    #[command(alias = "history")]
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Only show notes containing this text
        #[arg(short, long)]
        query: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search gists and details
    Search {
        /// Search query
        query: String,
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a note's details
    #[command(alias = "edit")]
    Details {
        /// Note ID or unique ID prefix
        id: String,
        /// New details (opens $EDITOR when omitted)
        #[arg(short, long, value_name = "TEXT")]
        text: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
        /// History filter the note is being deleted from
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Export all notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Replace all notes with an exported JSON snapshot
    Import {
        /// Snapshot file
        path: PathBuf,
    },
    /// Show or change display preferences
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Delete every note, keeping preferences
    Clear {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Erase all notes and preferences
    Reset {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for aha_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print current preferences
    Show,
    /// Change the theme
    Theme {
        #[arg(value_enum)]
        mode: ThemeChoice,
    },
    /// Pick an accent color (lists the palette when omitted)
    Accent {
        /// Palette key, e.g. `teal`
        key: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Print the config file location
    Path,
    /// Persist a default database path
    SetDbPath {
        /// Database file path
        path: PathBuf,
    },
}
