//! Colour filter selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour transform applied to a resized image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Identity, pixels are left untouched.
    #[default]
    Default,
    /// Full desaturation.
    GrayScale,
    /// Desaturation followed by a warm tint.
    Sepia,
    /// Per-channel negation of colour, alpha untouched.
    Invert,
}

impl FilterKind {
    /// All filters in declaration order.
    pub const ALL: [Self; 4] = [Self::Default, Self::GrayScale, Self::Sepia, Self::Invert];

    /// Returns the lowercase name used in cache keys and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::GrayScale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
        }
    }

    /// Returns true if the filter leaves pixels untouched.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "none" => Ok(Self::Default),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::GrayScale),
            "sepia" => Ok(Self::Sepia),
            "invert" => Ok(Self::Invert),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}
