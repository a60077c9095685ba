use std::path::Path;

use aha_core::Session;

use crate::error::CliError;

/// Replace all notes with the snapshot at `path`
pub fn run_import(session: &mut Session, path: &Path) -> Result<usize, CliError> {
    let payload = std::fs::read_to_string(path)?;
    let count = session.import(&payload)?;
    println!("Imported {count} notes.");
    Ok(count)
}
