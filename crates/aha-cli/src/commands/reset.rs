use aha_core::Session;

use crate::error::CliError;

pub fn run_clear(session: &mut Session, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired("delete every note"));
    }

    let count = session.notes().len();
    session.clear_notes()?;
    println!("Deleted {count} notes.");
    Ok(())
}

/// Erase notes and preferences, as on a fresh install
pub fn run_reset(session: &mut Session, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired("reset all data"));
    }

    session.factory_reset()?;
    println!("All data has been reset.");
    Ok(())
}
