//! Note model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;
use crate::error::Error;

/// A unique note identifier.
///
/// Generated ids are UUID v7 (time-sortable). Ids that arrive through import
/// are kept verbatim, so the inner value is an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("note id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A captured insight: a short gist plus optional details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Short headline text
    pub gist: String,
    /// Optional multi-line elaboration
    #[serde(default)]
    pub details: String,
    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note with the given gist, stamped with the current time
    #[must_use]
    pub fn new(gist: impl Into<String>) -> Self {
        Self::new_at(gist, Utc::now())
    }

    /// Create a new note stamped with an explicit creation time.
    ///
    /// Timestamps are kept at millisecond precision, matching what survives
    /// serialization.
    #[must_use]
    pub fn new_at(gist: impl Into<String>, now: DateTime<Utc>) -> Self {
        let now = now.trunc_subsecs(3);
        Self {
            id: NoteId::new(),
            gist: gist.into(),
            details: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style details setter, used for derived notes
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Replace details and refresh `updated_at`, never moving it before creation
    pub fn set_details(&mut self, details: impl Into<String>, now: DateTime<Utc>) {
        self.details = details.into();
        self.updated_at = now.trunc_subsecs(3).max(self.created_at);
    }

    /// Whether the note has any elaboration beyond its gist
    #[must_use]
    pub fn has_details(&self) -> bool {
        !self.details.trim().is_empty()
    }

    /// Case-insensitive substring match over gist and details.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.gist.to_lowercase().contains(needle) || self.details.to_lowercase().contains(needle)
    }
}
