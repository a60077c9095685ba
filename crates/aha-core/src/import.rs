//! Import of exported note snapshots.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ImportError;
use crate::models::Note;
use crate::store::NoteStore;

/// Parse an exported snapshot into notes.
///
/// The payload must be a JSON array of notes. Timestamp fields are coerced to
/// timestamps during deserialization. Every note needs a non-empty unique id
/// and a non-blank gist; an `updatedAt` earlier than `createdAt` is raised to
/// `createdAt`.
pub fn parse_import(payload: &str) -> Result<Vec<Note>, ImportError> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray(json_kind(&value)));
    }
    let mut notes: Vec<Note> = serde_json::from_value(value)?;

    let mut seen = HashSet::with_capacity(notes.len());
    for (index, note) in notes.iter_mut().enumerate() {
        if note.id.as_str().trim().is_empty() {
            return Err(ImportError::InvalidNote {
                index,
                reason: "empty id",
            });
        }
        if note.gist.trim().is_empty() {
            return Err(ImportError::InvalidNote {
                index,
                reason: "blank gist",
            });
        }
        if !seen.insert(note.id.clone()) {
            return Err(ImportError::DuplicateId(note.id.to_string()));
        }
        note.updated_at = note.updated_at.max(note.created_at);
    }

    Ok(notes)
}

/// Replace the store's contents with an imported snapshot.
///
/// The import is not merged: on success the store holds exactly the imported
/// notes. On failure the error is logged and the store is left untouched.
pub fn import_notes(store: &mut NoteStore, payload: &str) -> Result<usize, ImportError> {
    let notes = parse_import(payload).inspect_err(|error| {
        tracing::error!("Error importing notes: {error}");
    })?;

    let count = notes.len();
    store.replace_all(notes)?;
    tracing::info!("Imported {count} notes.");
    Ok(count)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
