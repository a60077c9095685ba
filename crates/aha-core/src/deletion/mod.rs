//! Two-phase note deletion.
//!
//! Deleting a note from the history list happens in two steps so a renderer
//! can animate it out and let the cards below slide up one after another:
//!
//! 1. `request` records a [`PendingDeletion`] marker holding the note's display
//!    index and a snapshot of the displayed list (phase `PendingExit`).
//! 2. Once the commit delay has passed, `poll` removes the note from the live
//!    store by id (phase `Committed`).
//! 3. After the longer of the exit animation and the shift stagger, plus a
//!    buffer, `poll` drops the marker (back to `Idle`).
//!
//! Each request is independent. Overlapping requests only overlap visually;
//! removal by id is idempotent and order-independent.

mod clock;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Note, NoteId};
use crate::store::NoteStore;

pub use clock::{Clock, ManualClock, SystemClock};

/// Delays driving the sequence, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletionTimings {
    /// Wait before removing the note from the store
    pub commit_delay_ms: u64,
    /// Duration of the deleted card's exit animation
    pub exit_animation_ms: u64,
    /// Per-card delay of the shift cascade
    pub stagger_ms: u64,
    /// Extra time before the marker is cleared
    pub clear_buffer_ms: u64,
}

impl Default for DeletionTimings {
    fn default() -> Self {
        Self {
            commit_delay_ms: 50,
            exit_animation_ms: 250,
            stagger_ms: 50,
            clear_buffer_ms: 300,
        }
    }
}

impl DeletionTimings {
    pub const fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// Time between commit and marker clear for a given marker
    pub fn clear_delay(&self, marker: &PendingDeletion) -> Duration {
        let shifted = u32::try_from(marker.shifted_count()).unwrap_or(u32::MAX);
        let shift = Duration::from_millis(self.stagger_ms).saturating_mul(shifted);
        let exit = Duration::from_millis(self.exit_animation_ms);
        exit.max(shift) + Duration::from_millis(self.clear_buffer_ms)
    }

    /// Time between request and marker clear
    pub fn total_window(&self, marker: &PendingDeletion) -> Duration {
        self.commit_delay() + self.clear_delay(marker)
    }
}

/// Transient marker bridging the visual exit and the store removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub note_id: NoteId,
    /// Position of the note in the displayed list when deletion was requested
    pub original_display_index: usize,
    /// Displayed list at request time; reference frame for the shift cascade
    pub snapshot: Vec<Note>,
}

impl PendingDeletion {
    /// Notes displayed after the deleted one, which shift up
    pub fn shifted_count(&self) -> usize {
        self.snapshot
            .len()
            .saturating_sub(self.original_display_index + 1)
    }

    /// Whether `id` is one of the notes that shift as a result
    pub fn shifts(&self, id: &NoteId) -> bool {
        self.snapshot
            .iter()
            .skip(self.original_display_index + 1)
            .any(|note| note.id == *id)
    }
}

/// Where a note is in the deletion sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPhase {
    Idle,
    PendingExit,
    Committed,
}

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The note wasn't on screen, so it was removed from the store right away
    RemovedDirectly { removed: bool },
    /// The note entered the two-phase sequence
    Scheduled { commit_at: Instant },
}

/// State change reported by `poll`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionEvent {
    Committed { note_id: NoteId, removed: bool },
    Cleared { note_id: NoteId },
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    PendingExit { commit_at: Instant },
    Committed { clear_at: Instant },
}

#[derive(Debug)]
struct InFlight {
    marker: PendingDeletion,
    stage: Stage,
}

/// Drives deletions through `PendingExit → Committed → Idle`
#[derive(Debug)]
pub struct DeletionSequencer<C: Clock = SystemClock> {
    clock: C,
    timings: DeletionTimings,
    in_flight: Vec<InFlight>,
}

impl<C: Clock> DeletionSequencer<C> {
    pub fn new(clock: C) -> Self {
        Self::with_timings(clock, DeletionTimings::default())
    }

    pub const fn with_timings(clock: C, timings: DeletionTimings) -> Self {
        Self {
            clock,
            timings,
            in_flight: Vec::new(),
        }
    }

    pub const fn timings(&self) -> &DeletionTimings {
        &self.timings
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Start deleting `id` from the `displayed` list.
    ///
    /// When the note isn't displayed (the list changed under the caller), it
    /// is removed from the store immediately and no marker is recorded.
    pub fn request(
        &mut self,
        id: &NoteId,
        displayed: &[Note],
        store: &mut NoteStore,
    ) -> Result<DeleteOutcome> {
        let Some(index) = displayed.iter().position(|note| note.id == *id) else {
            tracing::warn!(
                "Note {id} not found in displayed list; deleting from store directly"
            );
            let removed = store.remove(id)?;
            return Ok(DeleteOutcome::RemovedDirectly { removed });
        };

        if let Some(Stage::PendingExit { commit_at }) = self.stage_of(id) {
            return Ok(DeleteOutcome::Scheduled { commit_at });
        }

        let commit_at = self.clock.now() + self.timings.commit_delay();
        self.in_flight.push(InFlight {
            marker: PendingDeletion {
                note_id: id.clone(),
                original_display_index: index,
                snapshot: displayed.to_vec(),
            },
            stage: Stage::PendingExit { commit_at },
        });
        tracing::debug!("Scheduled deletion of {id} at display index {index}");
        Ok(DeleteOutcome::Scheduled { commit_at })
    }

    /// Advance every in-flight deletion whose deadline has passed.
    ///
    /// Removal reads the store as it is now, never the snapshot.
    pub fn poll(&mut self, store: &mut NoteStore) -> Result<Vec<DeletionEvent>> {
        let now = self.clock.now();
        let mut events = Vec::new();
        let mut index = 0;

        while index < self.in_flight.len() {
            let entry = &mut self.in_flight[index];

            if let Stage::PendingExit { commit_at } = entry.stage {
                if now < commit_at {
                    index += 1;
                    continue;
                }
                let removed = store.remove(&entry.marker.note_id)?;
                let clear_at = commit_at + self.timings.clear_delay(&entry.marker);
                entry.stage = Stage::Committed { clear_at };
                events.push(DeletionEvent::Committed {
                    note_id: entry.marker.note_id.clone(),
                    removed,
                });
            }

            if let Stage::Committed { clear_at } = entry.stage {
                if now >= clear_at {
                    let finished = self.in_flight.remove(index);
                    events.push(DeletionEvent::Cleared {
                        note_id: finished.marker.note_id,
                    });
                    continue;
                }
            }

            index += 1;
        }

        Ok(events)
    }

    /// Earliest instant at which `poll` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.in_flight
            .iter()
            .map(|entry| match entry.stage {
                Stage::PendingExit { commit_at } => commit_at,
                Stage::Committed { clear_at } => clear_at,
            })
            .min()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn phase(&self, id: &NoteId) -> DeletionPhase {
        match self.stage_of(id) {
            None => DeletionPhase::Idle,
            Some(Stage::PendingExit { .. }) => DeletionPhase::PendingExit,
            Some(Stage::Committed { .. }) => DeletionPhase::Committed,
        }
    }

    /// Most recently requested marker that hasn't been cleared
    pub fn pending(&self) -> Option<&PendingDeletion> {
        self.in_flight.last().map(|entry| &entry.marker)
    }

    /// Every uncleared marker, oldest request first
    pub fn in_flight(&self) -> impl Iterator<Item = &PendingDeletion> {
        self.in_flight.iter().map(|entry| &entry.marker)
    }

    fn stage_of(&self, id: &NoteId) -> Option<Stage> {
        self.in_flight
            .iter()
            .rev()
            .find(|entry| entry.marker.note_id == *id)
            .map(|entry| entry.stage)
    }
}
