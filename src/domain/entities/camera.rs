//! Camera facing and access state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which camera a capture request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Front-facing camera.
    Front,
    /// Rear camera.
    #[default]
    Back,
}

impl CameraMode {
    /// Returns the opposite facing.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }

    /// Returns the numeric id used when persisting the mode.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Back => 0,
            Self::Front => 1,
        }
    }
}

/// Error for an id that maps to no camera mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("camera mode with id={0} does not exist")]
pub struct UnknownCameraMode(pub u8);

impl TryFrom<u8> for CameraMode {
    type Error = UnknownCameraMode;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Back),
            1 => Ok(Self::Front),
            other => Err(UnknownCameraMode(other)),
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Outcome of an access request to the host platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessState {
    /// Access has not been decided yet.
    #[default]
    Undefined,
    /// The user or platform refused access.
    Denied,
    /// Access granted.
    Authorized,
}

impl AccessState {
    /// Returns true if access was granted.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}
