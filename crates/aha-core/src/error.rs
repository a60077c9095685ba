//! Error types for aha-core

use thiserror::Error;

/// Result type alias using aha-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in aha-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Key/value backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),


    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons an import snapshot is rejected.
///
/// Import never mutates the store when one of these is returned.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Payload is not valid JSON, or an entry is not a valid note
    #[error("malformed import data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Payload is valid JSON but not an array
    #[error("invalid format: expected an array of notes, found {0}")]
    NotAnArray(&'static str),
    /// An entry parsed but breaks a note invariant
    #[error("invalid note at index {index}: {reason}")]
    InvalidNote { index: usize, reason: &'static str },
    /// Two entries share an id
    #[error("duplicate note id: {0}")]
    DuplicateId(String),

    /// Importing parsed fine but persisting the result failed
    #[error(transparent)]
    Store(#[from] Error),
}
