//! Image pipeline error types.

use thiserror::Error;

/// Result type for pipeline steps.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Failures of the resize pipeline.
///
/// These never reach callers of the resize API, which only sees an
/// absent result.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PipelineError {
    #[error("image source unreadable: {message}")]
    SourceUnreadable { message: String },

    #[error("failed to decode image: {message}")]
    DecodeFailure { message: String },

    #[error("failed to encode image: {message}")]
    EncodeFailure { message: String },
}

impl PipelineError {
    /// Creates source unreadable error.
    #[must_use]
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            message: message.into(),
        }
    }

    /// Creates decode failure error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    /// Creates encode failure error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::EncodeFailure {
            message: message.into(),
        }
    }

    /// Returns the pipeline stage that failed.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::SourceUnreadable { .. } => "open",
            Self::DecodeFailure { .. } => "decode",
            Self::EncodeFailure { .. } => "encode",
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        Self::unreadable(e.to_string())
    }
}
