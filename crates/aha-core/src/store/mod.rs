//! Stateful stores layered over the key/value backend

mod notes;
mod preferences;

pub use notes::{load_persisted, NoteStore};
pub use preferences::PreferenceStore;

use crate::error::Result;
use crate::storage::{keys, KeyValueStore};

/// Remove every application key from the backend.
///
/// Callers reload their stores afterwards to pick up first-run defaults.
pub fn clear_persisted(storage: &dyn KeyValueStore) -> Result<()> {
    for key in keys::ALL {
        storage.remove(key)?;
    }
    tracing::info!("Cleared all persisted application state");
    Ok(())
}
