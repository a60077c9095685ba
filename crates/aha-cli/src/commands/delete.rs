use aha_core::deletion::{DeleteOutcome, DeletionEvent};
use aha_core::router::View;
use aha_core::Session;
use tokio::time::{sleep_until, Instant};

use crate::commands::common::resolve_note;
use crate::error::CliError;

/// Delete a note from the (optionally filtered) history list and wait for
/// the deletion sequence to settle.
pub async fn run_delete(
    session: &mut Session,
    id: &str,
    query: Option<&str>,
) -> Result<DeleteOutcome, CliError> {
    let note = resolve_note(id, session)?;
    session.set_search_query(query.unwrap_or_default());
    session.navigate(View::History);

    let outcome = session.delete_note(&note.id)?;
    if let DeleteOutcome::Scheduled { .. } = outcome {
        drain_deletions(session).await?;
    }

    println!("{}", note.id);
    Ok(outcome)
}

/// Sleep until each pending deadline and advance the sequencer
pub async fn drain_deletions(session: &mut Session) -> Result<(), CliError> {
    while let Some(deadline) = session.sequencer().next_deadline() {
        sleep_until(Instant::from_std(deadline)).await;
        for event in session.tick()? {
            match event {
                DeletionEvent::Committed { note_id, removed } => {
                    tracing::debug!("Committed deletion of {note_id} (removed: {removed})");
                }
                DeletionEvent::Cleared { note_id } => {
                    tracing::debug!("Cleared deletion marker for {note_id}");
                }
            }
        }
    }

    Ok(())
}
