use aha_core::router::View;
use aha_core::{Note, Session};

use crate::commands::common::normalize_search_query;
use crate::commands::list::print_notes;
use crate::error::CliError;

pub fn run_search(
    session: &mut Session,
    query: &str,
    limit: usize,
    as_json: bool,
) -> Result<Vec<Note>, CliError> {
    let query = normalize_search_query(query)?;
    session.set_search_query(query);
    session.navigate(View::History);

    let mut notes = session.filtered_notes();
    notes.truncate(limit);
    print_notes(&notes, as_json, false)?;
    Ok(notes)
}
