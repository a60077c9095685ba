//! Screen routing: exactly one active view, no history stack.

use std::fmt;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Gist entry with the latest captures underneath
    #[default]
    Capture,
    /// Searchable list of every note
    History,
    /// Read-only note view
    Detail,
    /// Details editor for a single note
    FocusNote,
    /// Theme, accent and data management
    Settings,
}

impl View {
    /// Fixed back-navigation target, `None` at the root
    #[must_use]
    pub const fn back_target(self) -> Option<Self> {
        match self {
            Self::Capture => None,
            Self::History | Self::Settings => Some(Self::Capture),
            Self::Detail | Self::FocusNote => Some(Self::History),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::History => "history",
            Self::Detail => "detail",
            Self::FocusNote => "focusNote",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the single active view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Router {
    active: View,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn active(&self) -> View {
        self.active
    }

    pub fn navigate(&mut self, to: View) {
        if self.active != to {
            tracing::debug!("Navigating {} -> {}", self.active, to);
        }
        self.active = to;
    }

    /// Go to the active view's back target; stays put at the root.
    /// Returns the view that is active afterwards.
    pub fn back(&mut self) -> View {
        if let Some(target) = self.active.back_target() {
            self.navigate(target);
        }
        self.active
    }
}
