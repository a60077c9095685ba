use aha_core::router::View;
use aha_core::{Note, Session};

use crate::commands::common::{format_note_lines, note_to_list_item, NoteListItem};
use crate::error::CliError;

pub fn run_list(
    session: &mut Session,
    limit: usize,
    query: Option<&str>,
    as_json: bool,
) -> Result<Vec<Note>, CliError> {
    session.set_search_query(query.unwrap_or_default());
    session.navigate(View::History);

    let mut notes = session.filtered_notes();
    notes.truncate(limit);
    print_notes(&notes, as_json, session.search_query().is_empty())?;
    Ok(notes)
}

pub fn print_notes(notes: &[Note], as_json: bool, unfiltered: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        if unfiltered {
            println!("No notes yet.");
        } else {
            println!("No matching notes.");
        }
    } else {
        for line in format_note_lines(notes) {
            println!("{line}");
        }
    }

    Ok(())
}
