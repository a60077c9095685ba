//! Filter/sort projection over the note collection.
//!
//! The displayed history list is always derived from `(notes, query)` alone,
//! so the same inputs give the same list.

use crate::models::Note;

/// Notes matching `query`, newest first.
///
/// An empty query keeps every note. Otherwise a note is kept when its gist or
/// details contains the query, ignoring case. Notes created at the same
/// instant keep their relative input order.
#[must_use]
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let mut filtered = if query.is_empty() {
        notes.to_vec()
    } else {
        let needle = query.to_lowercase();
        notes
            .iter()
            .filter(|note| note.matches_lowercase(&needle))
            .cloned()
            .collect()
    };

    sort_newest_first(&mut filtered);
    filtered
}

/// The `limit` most recently created notes
#[must_use]
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<Note> {
    let mut recent = filter_notes(notes, "");
    recent.truncate(limit);
    recent
}

fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
