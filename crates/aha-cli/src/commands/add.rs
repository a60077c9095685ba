use aha_core::util::compact_text;
use aha_core::{Note, Session};

use crate::commands::common::{normalize_content, resolve_gist};
use crate::error::CliError;

pub fn run_add(
    session: &mut Session,
    gist_parts: &[String],
    details: Option<&str>,
) -> Result<Note, CliError> {
    let gist = resolve_gist(gist_parts)?;
    let note = session.submit_gist(&gist)?.ok_or(CliError::EmptyGist)?;
    tracing::debug!("Captured gist: {}", compact_text(&note.gist));

    let note = match details.and_then(normalize_content) {
        Some(details) => {
            session.set_detail_input(details);
            session.save_details()?.unwrap_or(note)
        }
        None => note,
    };

    println!("{}", note.id);
    Ok(note)
}
