use std::path::{Path, PathBuf};

use aha_core::export::suggested_export_file_name;
use aha_core::Session;

use crate::cli::ExportFormat;
use crate::error::CliError;

/// Export every note. Returns the written path, if any.
pub fn run_export(
    session: &Session,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<Option<PathBuf>, CliError> {
    let format = aha_core::export::ExportFormat::from(format);
    let Some(rendered) = session.export(format)? else {
        println!("No notes to export.");
        return Ok(None);
    };

    let Some(path) = output_path else {
        println!("{rendered}");
        return Ok(None);
    };

    let path = if path.is_dir() {
        path.join(suggested_export_file_name(format))
    } else {
        path.to_path_buf()
    };
    std::fs::write(&path, rendered)?;
    println!("{}", path.display());
    Ok(Some(path))
}
