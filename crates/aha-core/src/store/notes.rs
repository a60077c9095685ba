//! Note store: the authoritative ordered collection of notes.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Note, NoteId};
use crate::storage::{keys, KeyValueStore, SharedStorage};

/// In-memory note collection backed by a full-snapshot key/value entry.
///
/// Every mutation rewrites the whole `aha_notes` snapshot. Newest captures are
/// kept at the front.
pub struct NoteStore {
    storage: SharedStorage,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Create an empty store without touching the backend
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            notes: Vec::new(),
        }
    }

    /// Create a store and rehydrate it from the backend
    pub fn open(storage: SharedStorage) -> Result<Self> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    /// Reload the collection from the backend, replacing in-memory state
    pub fn load(&mut self) -> Result<&[Note]> {
        self.notes = load_persisted(self.storage.as_ref())?;
        tracing::debug!("Loaded {} notes", self.notes.len());
        Ok(&self.notes)
    }

    /// Write the full snapshot
    pub fn persist(&self) -> Result<()> {
        write_snapshot(self.storage.as_ref(), &self.notes)
    }

    /// Persist `next`, then make it the live collection.
    ///
    /// On a failed write the in-memory collection is left as it was.
    fn commit(&mut self, next: Vec<Note>) -> Result<()> {
        write_snapshot(self.storage.as_ref(), &next)?;
        self.notes = next;
        Ok(())
    }

    /// Capture a new gist.
    ///
    /// Returns `None` (and changes nothing) when the gist is blank.
    pub fn add(&mut self, gist: &str) -> Result<Option<Note>> {
        let gist = gist.trim();
        if gist.is_empty() {
            return Ok(None);
        }

        let note = Note::new(gist);
        self.insert(note.clone())?;
        Ok(Some(note))
    }

    /// Prepend an already-built note
    pub fn insert(&mut self, note: Note) -> Result<()> {
        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note);
        next.extend_from_slice(&self.notes);
        self.commit(next)
    }

    /// Replace a note's details and refresh its `updated_at`.
    ///
    /// Returns `None` when no note has this id.
    pub fn update_details(&mut self, id: &NoteId, details: &str) -> Result<Option<Note>> {
        let Some(index) = self.notes.iter().position(|note| note.id == *id) else {
            tracing::debug!("update_details: no note with id {id}");
            return Ok(None);
        };

        let mut next = self.notes.clone();
        next[index].set_details(details.trim(), Utc::now());
        let updated = next[index].clone();
        self.commit(next)?;
        Ok(Some(updated))
    }

    /// Remove a note by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &NoteId) -> Result<bool> {
        let next: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.id != *id)
            .cloned()
            .collect();
        if next.len() == self.notes.len() {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Swap in an entirely new collection (import)
    pub fn replace_all(&mut self, notes: Vec<Note>) -> Result<()> {
        self.commit(notes)
    }

    /// Drop every note and the persisted snapshot
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(keys::NOTES)?;
        self.notes.clear();
        Ok(())
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    /// Notes whose id starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note.id.as_str().starts_with(prefix))
            .collect()
    }

    /// Notes in storage order (newest capture first)
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn write_snapshot(storage: &dyn KeyValueStore, notes: &[Note]) -> Result<()> {
    let snapshot = serde_json::to_string(notes)?;
    storage.set(keys::NOTES, &snapshot)
}

/// Read the notes snapshot directly from a backend.
///
/// A missing key yields an empty collection. An unreadable snapshot is logged
/// and also yields an empty collection.
pub fn load_persisted(storage: &dyn KeyValueStore) -> Result<Vec<Note>> {
    let Some(raw) = storage.get(keys::NOTES)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Note>>(&raw) {
        Ok(notes) => Ok(notes),
        Err(error) => {
            tracing::error!("Error loading notes from storage: {error}");
            Ok(Vec::new())
        }
    }
}
