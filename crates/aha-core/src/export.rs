//! Note export helpers shared by every front-end.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::Note;
use crate::util::format_timestamp;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed array of notes; the only format import accepts
    #[default]
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render notes as a pretty-printed JSON array
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(notes)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", note.id);
        let _ = writeln!(output, "created_at: {}", format_timestamp(note.created_at));
        let _ = writeln!(output, "updated_at: {}", format_timestamp(note.updated_at));
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", note.gist);
        if note.has_details() {
            let _ = writeln!(output);
            output.push_str(&note.details);
            output.push('\n');
        }
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Render an export snapshot, or `None` when there is nothing to export.
pub fn export_notes(notes: &[Note], format: ExportFormat) -> serde_json::Result<Option<String>> {
    if notes.is_empty() {
        tracing::info!("No notes to export.");
        return Ok(None);
    }

    let rendered = render_notes_export(notes, format)?;
    tracing::info!("Exported {} notes as {}", notes.len(), format.extension());
    Ok(Some(rendered))
}

/// Default download file name for an export
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat) -> String {
    format!("aha-notes.{}", format.extension())
}
