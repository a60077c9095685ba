//! Application session: the controller behind every screen.
//!
//! A [`Session`] owns the note and preference stores, the router, the
//! deletion sequencer and the transient UI state (search query, open note,
//! details edit buffer). Front-ends call its methods in response to input and
//! call [`Session::tick`] when the sequencer's next deadline passes.

use crate::deletion::{
    Clock, DeleteOutcome, DeletionEvent, DeletionSequencer, DeletionTimings, PendingDeletion,
    SystemClock,
};
use crate::error::{ImportError, Result};
use crate::export::{export_notes, ExportFormat};
use crate::import::import_notes;
use crate::models::{AccentColor, Note, NoteId, Preferences};
use crate::router::{Router, View};
use crate::search::{filter_notes, recent_notes};
use crate::storage::SharedStorage;
use crate::store::{clear_persisted, NoteStore, PreferenceStore};
use crate::util::continue_list_item;

/// Number of recent captures shown under the gist input
pub const RECENT_CAPTURE_COUNT: usize = 2;

pub struct Session<C: Clock = SystemClock> {
    storage: SharedStorage,
    notes: NoteStore,
    preferences: PreferenceStore,
    router: Router,
    sequencer: DeletionSequencer<C>,
    search_query: String,
    current_note: Option<NoteId>,
    detail_input: String,
    show_welcome: bool,
}

impl Session<SystemClock> {
    /// Open a session on the wall clock
    pub fn open(storage: SharedStorage) -> Result<Self> {
        Self::with_clock(storage, SystemClock, DeletionTimings::default())
    }
}

impl<C: Clock> Session<C> {
    /// Open a session with an explicit clock and deletion timings
    pub fn with_clock(storage: SharedStorage, clock: C, timings: DeletionTimings) -> Result<Self> {
        let notes = NoteStore::open(storage.clone())?;
        let preferences = PreferenceStore::open(storage.clone())?;
        let show_welcome = !preferences.has_visited();

        Ok(Self {
            storage,
            notes,
            preferences,
            router: Router::new(),
            sequencer: DeletionSequencer::with_timings(clock, timings),
            search_query: String::new(),
            current_note: None,
            detail_input: String::new(),
            show_welcome,
        })
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    pub const fn view(&self) -> View {
        self.router.active()
    }

    pub const fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub const fn preferences(&self) -> Preferences {
        self.preferences.preferences()
    }

    pub const fn sequencer(&self) -> &DeletionSequencer<C> {
        &self.sequencer
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn detail_input(&self) -> &str {
        &self.detail_input
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.current_note
            .as_ref()
            .and_then(|id| self.notes.get(id))
    }

    pub const fn show_welcome(&self) -> bool {
        self.show_welcome
    }

    /// History list for the current search query
    pub fn filtered_notes(&self) -> Vec<Note> {
        filter_notes(self.notes.notes(), &self.search_query)
    }

    /// Latest captures shown on the capture screen
    pub fn recent_notes(&self) -> Vec<Note> {
        recent_notes(self.notes.notes(), RECENT_CAPTURE_COUNT)
    }

    /// Deletion marker the history list animates against
    pub fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.sequencer.pending()
    }

    // ---------------------------------------------------------------------
    // Navigation and editing
    // ---------------------------------------------------------------------

    pub fn navigate(&mut self, to: View) {
        self.router.navigate(to);
    }

    pub fn back(&mut self) -> View {
        self.router.back()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_detail_input(&mut self, text: impl Into<String>) {
        self.detail_input = text.into();
    }

    /// Capture a gist and open it for elaboration.
    ///
    /// Blank input changes nothing and returns `None`.
    pub fn submit_gist(&mut self, gist: &str) -> Result<Option<Note>> {
        let Some(note) = self.notes.add(gist)? else {
            return Ok(None);
        };

        self.current_note = Some(note.id.clone());
        self.detail_input.clear();
        self.router.navigate(View::FocusNote);
        Ok(Some(note))
    }

    /// Open a note read-only
    pub fn select_note(&mut self, id: &NoteId) -> bool {
        self.open_note(id, View::Detail)
    }

    /// Open a note's details editor
    pub fn focus_note(&mut self, id: &NoteId) -> bool {
        self.open_note(id, View::FocusNote)
    }

    fn open_note(&mut self, id: &NoteId, view: View) -> bool {
        let Some(note) = self.notes.get(id) else {
            tracing::debug!("Cannot open missing note {id}");
            return false;
        };

        self.detail_input.clone_from(&note.details);
        self.current_note = Some(note.id.clone());
        self.router.navigate(view);
        true
    }

    /// Save the edit buffer into the open note, then show history
    pub fn save_details(&mut self) -> Result<Option<Note>> {
        let Some(id) = self.current_note.clone() else {
            return Ok(None);
        };

        let updated = self.notes.update_details(&id, &self.detail_input)?;
        self.router.navigate(View::History);
        Ok(updated)
    }

    /// Discard unsaved edits and return to capture
    pub fn cancel_edit(&mut self) {
        self.detail_input = self
            .current_note()
            .map(|note| note.details.clone())
            .unwrap_or_default();
        self.current_note = None;
        self.router.navigate(View::Capture);
    }

    /// List-aware Enter in the details buffer at character offset `cursor`.
    ///
    /// Returns the new cursor, or `None` when the line isn't a list item and
    /// a plain newline applies.
    pub fn continue_details_list(&mut self, cursor: usize) -> Option<usize> {
        let edit = continue_list_item(&self.detail_input, cursor)?;
        self.detail_input = edit.text;
        Some(edit.cursor)
    }

    pub fn back_to_history(&mut self) {
        self.current_note = None;
        self.detail_input.clear();
        self.router.navigate(View::History);
    }

    /// Turn the selected range of the edit buffer into a new note.
    ///
    /// `start` and `end` are character offsets into the buffer, in either
    /// order. The selection is trimmed, and the new note's details point back
    /// at the note it was excerpted from.
    pub fn capture_excerpt(&mut self, start: usize, end: usize) -> Result<Option<Note>> {
        let (start, end) = (start.min(end), start.max(end));
        let selection: String = self
            .detail_input
            .chars()
            .skip(start)
            .take(end - start)
            .collect();
        let selection = selection.trim();
        if selection.is_empty() {
            return Ok(None);
        }

        let source = self
            .current_note()
            .map(|note| note.gist.clone())
            .unwrap_or_default();
        let note = Note::new(selection).with_details(format!("source: {source}"));
        self.notes.insert(note.clone())?;
        Ok(Some(note))
    }

    // ---------------------------------------------------------------------
    // Deletion
    // ---------------------------------------------------------------------

    /// Delete a note from the current history list.
    ///
    /// If the note is open, the session first navigates back to history.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<DeleteOutcome> {
        let displayed = self.filtered_notes();
        let is_displayed = displayed.iter().any(|note| note.id == *id);

        if is_displayed && self.current_note.as_ref() == Some(id) {
            self.back_to_history();
        }

        self.sequencer.request(id, &displayed, &mut self.notes)
    }

    /// Advance pending deletions whose deadlines have passed
    pub fn tick(&mut self) -> Result<Vec<DeletionEvent>> {
        self.sequencer.poll(&mut self.notes)
    }

    // ---------------------------------------------------------------------
    // Preferences and data management
    // ---------------------------------------------------------------------

    pub fn dismiss_welcome(&mut self) -> Result<()> {
        self.preferences.mark_visited()?;
        self.show_welcome = false;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        self.preferences.toggle_dark_mode()
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<()> {
        self.preferences.set_dark_mode(dark_mode)
    }

    pub fn set_accent(&mut self, accent: AccentColor) -> Result<()> {
        self.preferences.set_accent(accent)
    }

    pub fn set_accent_key(&mut self, key: &str) -> Result<AccentColor> {
        self.preferences.set_accent_key(key)
    }

    /// Render every note for download; `None` when there are no notes
    pub fn export(&self, format: ExportFormat) -> Result<Option<String>> {
        Ok(export_notes(self.notes.notes(), format)?)
    }

    /// Replace every note with an imported snapshot
    pub fn import(&mut self, payload: &str) -> std::result::Result<usize, ImportError> {
        let count = import_notes(&mut self.notes, payload)?;
        self.current_note = None;
        self.detail_input.clear();
        Ok(count)
    }

    /// Remove every note but keep preferences
    pub fn clear_notes(&mut self) -> Result<()> {
        self.notes.clear()?;
        self.current_note = None;
        self.detail_input.clear();
        Ok(())
    }

    /// Wipe all persisted state and reload from first-run defaults
    pub fn factory_reset(&mut self) -> Result<()> {
        clear_persisted(self.storage.as_ref())?;

        self.notes.load()?;
        self.preferences.load()?;
        self.show_welcome = !self.preferences.has_visited();
        self.router = Router::new();
        self.search_query.clear();
        self.current_note = None;
        self.detail_input.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::deletion::{DeletionPhase, ManualClock};
    use crate::storage::{keys, KeyValueStore, MemoryStorage};

    fn setup() -> (Arc<MemoryStorage>, ManualClock, Session<ManualClock>) {
        let backend = Arc::new(MemoryStorage::new());
        let clock = ManualClock::new();
        let session =
            Session::with_clock(backend.clone(), clock.clone(), DeletionTimings::default())
                .unwrap();
        (backend, clock, session)
    }

    #[test]
    fn submit_gist_opens_focus_view() {
        let (_, _, mut session) = setup();

        let note = session.submit_gist("  insight  ").unwrap().unwrap();

        assert_eq!(session.view(), View::FocusNote);
        assert_eq!(session.current_note().unwrap().id, note.id);
        assert_eq!(session.detail_input(), "");
    }

    #[test]
    fn blank_gist_stays_on_capture() {
        let (_, _, mut session) = setup();
        assert!(session.submit_gist("   ").unwrap().is_none());
        assert_eq!(session.view(), View::Capture);
        assert!(session.notes().is_empty());
    }

    #[test]
    fn save_details_persists_and_returns_to_history() {
        let (backend, clock, mut session) = setup();
        let note = session.submit_gist("gist").unwrap().unwrap();

        session.set_detail_input("  more context  ");
        let updated = session.save_details().unwrap().unwrap();

        assert_eq!(updated.details, "more context");
        assert_eq!(session.view(), View::History);

        let reopened =
            Session::with_clock(backend, clock, DeletionTimings::default()).unwrap();
        assert_eq!(reopened.notes().get(&note.id).unwrap().details, "more context");
    }

    #[test]
    fn cancel_edit_discards_unsaved_changes() {
        let (_, _, mut session) = setup();
        let note = session.submit_gist("gist").unwrap().unwrap();
        session.set_detail_input("saved");
        session.save_details().unwrap();

        assert!(session.focus_note(&note.id));
        session.set_detail_input("unsaved scribbles");
        session.cancel_edit();

        assert_eq!(session.detail_input(), "saved");
        assert_eq!(session.view(), View::Capture);
        assert!(session.current_note().is_none());
        assert_eq!(session.notes().get(&note.id).unwrap().details, "saved");
    }

    #[test]
    fn select_note_loads_details_into_buffer() {
        let (_, _, mut session) = setup();
        let note = session.submit_gist("gist").unwrap().unwrap();
        session.set_detail_input("body");
        session.save_details().unwrap();
        session.back_to_history();

        assert!(session.select_note(&note.id));
        assert_eq!(session.view(), View::Detail);
        assert_eq!(session.detail_input(), "body");
        assert!(!session.select_note(&"nope".parse().unwrap()));
    }

    #[test]
    fn filtered_notes_follow_search_query() {
        let (_, _, mut session) = setup();
        session.submit_gist("rust lifetimes").unwrap();
        session.submit_gist("grocery list").unwrap();

        session.set_search_query("RUST");
        let filtered = session.filtered_notes();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].gist, "rust lifetimes");

        session.set_search_query("");
        assert_eq!(session.filtered_notes().len(), 2);
    }

    #[test]
    fn recent_notes_shows_latest_two() {
        let (_, _, mut session) = setup();
        for gist in ["one", "two", "three"] {
            session.submit_gist(gist).unwrap();
        }
        assert_eq!(session.recent_notes().len(), RECENT_CAPTURE_COUNT);
    }

    #[test]
    fn deleting_open_note_navigates_back_then_sequences() {
        let (_, clock, mut session) = setup();
        let keep = session.submit_gist("keep").unwrap().unwrap();
        let doomed = session.submit_gist("doomed").unwrap().unwrap();
        assert_eq!(session.view(), View::FocusNote);

        let outcome = session.delete_note(&doomed.id).unwrap();

        assert!(matches!(outcome, DeleteOutcome::Scheduled { .. }));
        assert_eq!(session.view(), View::History);
        assert!(session.current_note().is_none());
        assert_eq!(session.pending_deletion().unwrap().note_id, doomed.id);
        assert_eq!(session.notes().len(), 2);

        clock.advance(Duration::from_secs(1));
        session.tick().unwrap();

        assert!(session.pending_deletion().is_none());
        assert_eq!(
            session.sequencer().phase(&doomed.id),
            DeletionPhase::Idle
        );
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.notes().notes()[0].id, keep.id);
    }

    #[test]
    fn deleting_note_hidden_by_search_removes_directly() {
        let (_, _, mut session) = setup();
        let hidden = session.submit_gist("hidden").unwrap().unwrap();
        session.submit_gist("shown").unwrap();
        session.set_search_query("shown");

        let outcome = session.delete_note(&hidden.id).unwrap();

        assert_eq!(outcome, DeleteOutcome::RemovedDirectly { removed: true });
        assert!(session.notes().get(&hidden.id).is_none());
        assert!(session.pending_deletion().is_none());
    }

    #[test]
    fn capture_excerpt_creates_sourced_note() {
        let (_, _, mut session) = setup();
        session.submit_gist("Reading notes").unwrap();
        session.set_detail_input("the key idea is ownership");

        let excerpt = session.capture_excerpt(16, 25).unwrap().unwrap();

        assert_eq!(excerpt.gist, "ownership");
        assert_eq!(excerpt.details, "source: Reading notes");
        assert_eq!(session.notes().notes()[0].id, excerpt.id);
        assert!(session.capture_excerpt(3, 3).unwrap().is_none());
    }

    #[test]
    fn details_list_continues_until_empty_item() {
        let (_, _, mut session) = setup();
        session.submit_gist("Groceries").unwrap();
        session.set_detail_input("- milk");

        assert_eq!(session.continue_details_list(6), Some(9));
        assert_eq!(session.detail_input(), "- milk\n- ");
        assert_eq!(session.continue_details_list(9), Some(7));
        assert_eq!(session.detail_input(), "- milk\n");

        session.set_detail_input("plain");
        assert_eq!(session.continue_details_list(5), None);
        assert_eq!(session.detail_input(), "plain");
    }

    #[test]
    fn capture_excerpt_trims_and_accepts_reversed_range() {
        let (_, _, mut session) = setup();
        session.submit_gist("Reading notes").unwrap();
        session.set_detail_input("the key idea is ownership");

        let excerpt = session.capture_excerpt(16, 7).unwrap().unwrap();

        assert_eq!(excerpt.gist, "idea is");
        assert!(session.capture_excerpt(15, 16).unwrap().is_none());
    }

    #[test]
    fn export_is_noop_when_empty() {
        let (_, _, session) = setup();
        assert_eq!(session.export(ExportFormat::Json).unwrap(), None);
    }

    #[test]
    fn welcome_shows_until_dismissed() {
        let (backend, clock, mut session) = setup();
        assert!(session.show_welcome());

        session.dismiss_welcome().unwrap();
        assert!(!session.show_welcome());

        let reopened =
            Session::with_clock(backend, clock, DeletionTimings::default()).unwrap();
        assert!(!reopened.show_welcome());
    }

    #[test]
    fn clear_notes_keeps_preferences() {
        let (backend, _, mut session) = setup();
        session.submit_gist("note").unwrap();
        session.set_accent(AccentColor::Teal).unwrap();

        session.clear_notes().unwrap();

        assert!(session.notes().is_empty());
        assert_eq!(backend.get(keys::NOTES).unwrap(), None);
        assert_eq!(session.preferences().accent, AccentColor::Teal);
    }

    #[test]
    fn factory_reset_restores_defaults() {
        let (backend, clock, mut session) = setup();
        session.submit_gist("note").unwrap();
        session.set_dark_mode(false).unwrap();
        session.set_accent(AccentColor::Orange).unwrap();
        session.dismiss_welcome().unwrap();

        session.factory_reset().unwrap();

        assert!(session.notes().is_empty());
        assert_eq!(session.preferences(), Preferences::default());
        assert!(session.show_welcome());
        assert_eq!(session.view(), View::Capture);
        for key in [keys::NOTES, keys::ACCENT_KEY, keys::ACCENT_HSL, keys::VISITED] {
            assert_eq!(backend.get(key).unwrap(), None, "{key} should be cleared");
        }

        let reopened =
            Session::with_clock(backend, clock, DeletionTimings::default()).unwrap();
        assert!(reopened.notes().is_empty());
        assert_eq!(reopened.preferences(), Preferences::default());
        assert!(reopened.show_welcome());
    }

    #[test]
    fn import_replaces_notes_and_closes_open_note() {
        let (_, _, mut session) = setup();
        session.submit_gist("old").unwrap();

        let count = session
            .import(r#"[{"id":"1","gist":"x","details":"","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#)
            .unwrap();

        assert_eq!(count, 1);
        assert!(session.current_note().is_none());
        assert_eq!(session.notes().notes()[0].gist, "x");
    }
}
