//! Device-local key/value persistence boundary.
//!
//! Every persisted piece of state (the notes snapshot, theme flag, accent
//! colour and visited flag) lives under a string key with a string value.
//! Stores receive a [`SharedStorage`] so tests can swap in [`MemoryStorage`].

mod memory;

use std::sync::Arc;

use crate::error::Result;

pub use memory::MemoryStorage;

/// Persisted key names
pub mod keys {
    /// Serialized array of notes
    pub const NOTES: &str = "aha_notes";
    /// Serialized boolean dark-mode flag
    pub const DARK_MODE: &str = "aha_darkMode";
    /// Accent palette key
    pub const ACCENT_KEY: &str = "aha_accentColor_key";
    /// Accent fill channels, derived from the key
    pub const ACCENT_HSL: &str = "aha_accentColor_hsl";
    /// Accent foreground channels, derived from the key
    pub const ACCENT_FG_HSL: &str = "aha_accentColor_fg_hsl";
    /// First-run flag
    pub const VISITED: &str = "aha_has_visited";

    /// Every key owned by the application, cleared on factory reset
    pub const ALL: [&str; 6] = [NOTES, DARK_MODE, ACCENT_KEY, ACCENT_HSL, ACCENT_FG_HSL, VISITED];
}

/// String-keyed storage backend
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write (overwrite) a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Backend handle shared between the note and preference stores
pub type SharedStorage = Arc<dyn KeyValueStore>;
