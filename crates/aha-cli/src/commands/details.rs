use aha_core::{Note, Session};

use crate::commands::common::{capture_editor_input_with_initial, resolve_note};
use crate::error::CliError;

/// Replace a note's details. Empty details are allowed.
pub fn run_details(session: &mut Session, id: &str, text: Option<&str>) -> Result<Note, CliError> {
    let note = resolve_note(id, session)?;
    session.focus_note(&note.id);

    let details = match text {
        Some(text) => text.trim().to_string(),
        None => capture_editor_input_with_initial(session.detail_input())?,
    };
    session.set_detail_input(details);

    let updated = session
        .save_details()?
        .ok_or_else(|| CliError::NoteNotFound(note.id.to_string()))?;
    println!("{}", updated.id);
    Ok(updated)
}
