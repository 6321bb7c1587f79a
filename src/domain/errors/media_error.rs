//! Media capability error types.

use thiserror::Error;

/// Failures of the host media capabilities.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MediaError {
    #[error("access to {capability} was denied")]
    AccessDenied { capability: &'static str },

    #[error("{capability} is not supported by this provider")]
    Unsupported { capability: &'static str },

    #[error("a pick request is already in progress")]
    PickerBusy,

    #[error("media io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Creates access denied error.
    #[must_use]
    pub const fn denied(capability: &'static str) -> Self {
        Self::AccessDenied { capability }
    }

    /// Creates unsupported capability error.
    #[must_use]
    pub const fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    /// Returns whether retrying later could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::PickerBusy | Self::Io(_))
    }
}
