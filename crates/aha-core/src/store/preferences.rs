//! Preference store: theme flag, accent colour and first-run flag.

use crate::error::Result;
use crate::models::{AccentColor, Preferences};
use crate::storage::{keys, SharedStorage};

/// Persisted display preferences
pub struct PreferenceStore {
    storage: SharedStorage,
    preferences: Preferences,
    visited: bool,
}

impl PreferenceStore {
    /// Create a store and load its state from the backend
    pub fn open(storage: SharedStorage) -> Result<Self> {
        let mut store = Self {
            storage,
            preferences: Preferences::default(),
            visited: false,
        };
        store.load()?;
        Ok(store)
    }

    /// Reload from the backend, applying first-run defaults.
    ///
    /// A missing dark-mode flag is treated as a first run: the default is
    /// applied and written back.
    pub fn load(&mut self) -> Result<Preferences> {
        let defaults = Preferences::default();

        let dark_mode = if let Some(value) = self.storage.get(keys::DARK_MODE)? {
            parse_flag(&value)
        } else {
            self.storage
                .set(keys::DARK_MODE, &serde_json::to_string(&defaults.dark_mode)?)?;
            defaults.dark_mode
        };

        let accent = match self.storage.get(keys::ACCENT_KEY)? {
            Some(key) => key.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown accent color '{key}', using default");
                defaults.accent
            }),
            None => defaults.accent,
        };

        self.visited = self
            .storage
            .get(keys::VISITED)?
            .is_some_and(|value| parse_flag(&value));
        self.preferences = Preferences { dark_mode, accent };
        Ok(self.preferences)
    }

    pub const fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub const fn dark_mode(&self) -> bool {
        self.preferences.dark_mode
    }

    pub const fn accent(&self) -> AccentColor {
        self.preferences.accent
    }

    /// Flip the theme and persist it, returning the new value
    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        let next = !self.preferences.dark_mode;
        self.set_dark_mode(next)?;
        Ok(next)
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<()> {
        self.storage
            .set(keys::DARK_MODE, &serde_json::to_string(&dark_mode)?)?;
        self.preferences.dark_mode = dark_mode;
        Ok(())
    }

    /// Select an accent colour, persisting its key and derived channels
    pub fn set_accent(&mut self, accent: AccentColor) -> Result<()> {
        self.storage.set(keys::ACCENT_KEY, accent.key())?;
        self.storage.set(keys::ACCENT_HSL, accent.hsl())?;
        self.storage
            .set(keys::ACCENT_FG_HSL, accent.foreground_hsl())?;
        self.preferences.accent = accent;
        Ok(())
    }

    /// Select an accent colour by palette key; unknown keys change nothing
    pub fn set_accent_key(&mut self, key: &str) -> Result<AccentColor> {
        let accent: AccentColor = key.parse()?;
        self.set_accent(accent)?;
        Ok(accent)
    }

    pub const fn has_visited(&self) -> bool {
        self.visited
    }

    /// Record that the welcome screen has been dismissed
    pub fn mark_visited(&mut self) -> Result<()> {
        self.storage.set(keys::VISITED, "true")?;
        self.visited = true;
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
