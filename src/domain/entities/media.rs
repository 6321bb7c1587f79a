//! Gallery entries.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::ImageSource;

/// A single image listed by a gallery source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaImage {
    /// Position-independent identifier.
    pub id: u64,
    /// Location of the encoded image.
    pub path: PathBuf,
    /// Display name.
    pub name: String,
    /// Last modification time, used for ordering.
    pub modified: Option<DateTime<Utc>>,
}

impl MediaImage {
    /// Returns the pipeline source for this entry.
    #[must_use]
    pub fn source(&self) -> ImageSource {
        ImageSource::file(self.path.clone())
    }
}
