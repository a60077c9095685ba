//! Data models for Aha

mod note;
mod preferences;
mod timestamp;

pub use note::{Note, NoteId};
pub use preferences::{AccentColor, Preferences};
