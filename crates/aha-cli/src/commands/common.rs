use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use aha_core::util::{format_note_date, format_timestamp, normalize_text_option};
use aha_core::{Note, NoteId, Session};
use chrono::Utc;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub gist: String,
    pub details: String,
    pub created_at: String,
    pub updated_at: String,
    pub date: String,
    pub relative_time: String,
}

/// Find a note by exact id, falling back to a unique id prefix
pub fn resolve_note(note_query: &str, session: &Session) -> Result<Note, CliError> {
    let note_query = normalize_note_identifier(note_query)?;

    if let Ok(note_id) = note_query.parse::<NoteId>() {
        if let Some(note) = session.notes().get(&note_id) {
            return Ok(note.clone());
        }
    }

    let matching = session.notes().find_by_prefix(&note_query);
    match matching.as_slice() {
        [] => Err(CliError::NoteNotFound(note_query)),
        [note] => Ok((*note).clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|note| short_id(&note.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(13).collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(&note.id);
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.created_at.timestamp_millis(), now_ms);

            if note.has_details() {
                format!("{short_id:<13}  {preview:<40}  {relative_time:<10}  +details")
            } else {
                format!("{short_id:<13}  {preview:<40}  {relative_time}")
            }
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now = Utc::now();

    NoteListItem {
        id: note.id.to_string(),
        gist: note.gist.clone(),
        details: note.details.clone(),
        created_at: format_timestamp(note.created_at),
        updated_at: format_timestamp(note.updated_at),
        date: format_note_date(note.created_at, now.date_naive()),
        relative_time: format_relative_time(
            note.created_at.timestamp_millis(),
            now.timestamp_millis(),
        ),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let collapsed = note.gist.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Gist from arguments, then piped stdin, then `$EDITOR`
pub fn resolve_gist(gist_parts: &[String]) -> Result<String, CliError> {
    if let Some(gist) = normalize_content(&gist_parts.join(" ")) {
        return Ok(gist);
    }

    if let Some(gist) = read_piped_stdin()? {
        return Ok(gist);
    }

    if let Some(gist) = normalize_content(&capture_editor_input_with_initial("")?) {
        return Ok(gist);
    }

    Err(CliError::EmptyGist)
}

pub fn normalize_content(content: &str) -> Option<String> {
    normalize_text_option(Some(content))
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    normalize_content(query).ok_or(CliError::EmptySearchQuery)
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    normalize_content(id).ok_or(CliError::EmptyNoteId)
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

/// Open `$EDITOR` on a temp file seeded with `initial_content`.
///
/// Returns the edited text with surrounding whitespace trimmed, which may be
/// empty.
pub fn capture_editor_input_with_initial(initial_content: &str) -> Result<String, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let edited = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(edited.trim().to_string())
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        // EDITOR may carry arguments, e.g. `code --wait`
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let status = Command::new(program).args(parts).arg(file_path).status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("aha-note-{}-{now}.md", std::process::id()))
}
