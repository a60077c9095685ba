//! Display preferences model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Accent colour palette.
///
/// Each entry carries a fill and a contrasting foreground, both as HSL channel
/// strings (`"217 91% 60%"`) so a renderer can paint them without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Teal,
    Gray,
}

impl AccentColor {
    /// Every palette entry in display order
    pub const ALL: [Self; 7] = [
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Pink,
        Self::Teal,
        Self::Gray,
    ];

    /// Persisted key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Teal => "teal",
            Self::Gray => "gray",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "Default Blue",
            Self::Green => "Green",
            Self::Purple => "Purple",
            Self::Orange => "Orange",
            Self::Pink => "Pink",
            Self::Teal => "Teal",
            Self::Gray => "Graphite",
        }
    }

    /// Fill colour as HSL channels
    #[must_use]
    pub const fn hsl(self) -> &'static str {
        match self {
            Self::Blue => "217 91% 60%",
            Self::Green => "142 71% 45%",
            Self::Purple => "262 83% 58%",
            Self::Orange => "25 95% 53%",
            Self::Pink => "330 80% 55%",
            Self::Teal => "162 72% 45%",
            Self::Gray => "215 14% 47%",
        }
    }

    /// Foreground colour drawn on top of the fill
    #[must_use]
    pub const fn foreground_hsl(self) -> &'static str {
        "0 0% 100%"
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AccentColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.key() == wanted)
            .ok_or_else(|| {
                let known = Self::ALL.map(Self::key).join(", ");
                Error::InvalidInput(format!("unknown accent color '{s}' (expected one of: {known})"))
            })
    }
}

/// Display preferences, persisted independently of notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Dark theme flag
    pub dark_mode: bool,
    /// Selected accent colour
    pub accent: AccentColor,
}

impl Default for Preferences {
    /// First-run defaults: dark theme with the default blue accent
    fn default() -> Self {
        Self {
            dark_mode: true,
            accent: AccentColor::default(),
        }
    }
}
