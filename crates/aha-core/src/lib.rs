//! aha-core - Core library for Aha
//!
//! This crate contains the note and preference models, the key/value
//! persistence boundary, the history projection, the two-phase deletion
//! sequencer and the session controller shared by every Aha front-end.

pub mod db;
pub mod deletion;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod router;
pub mod search;
pub mod session;
pub mod storage;
pub mod store;
pub mod util;

pub use error::{Error, ImportError, Result};
pub use models::{AccentColor, Note, NoteId, Preferences};
pub use session::Session;

/// Version string shown by front-ends
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
