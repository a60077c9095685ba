use aha_core::util::{format_note_date, format_timestamp};
use aha_core::{Note, Session};
use chrono::Utc;

use crate::commands::common::resolve_note;
use crate::error::CliError;

pub fn run_show(session: &mut Session, id: &str, as_json: bool) -> Result<Note, CliError> {
    let note = resolve_note(id, session)?;
    session.select_note(&note.id);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&note)?);
        return Ok(note);
    }

    let today = Utc::now().date_naive();
    println!("{}", note.gist);
    println!(
        "id: {}  created: {} ({})",
        note.id,
        format_note_date(note.created_at, today),
        format_timestamp(note.created_at)
    );
    if note.updated_at != note.created_at {
        println!("updated: {}", format_timestamp(note.updated_at));
    }
    if note.has_details() {
        println!();
        println!("{}", note.details);
    }

    Ok(note)
}
