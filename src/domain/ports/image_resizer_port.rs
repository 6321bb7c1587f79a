//! Port definition for the resize pipeline.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{FilterKind, ImageSource, ResizeOptions};

/// Port for turning a source image into display-ready encoded bytes.
#[async_trait]
pub trait ImageResizerPort: Send + Sync {
    /// Resizes, orients, filters and re-encodes `source`.
    /// Returns None when no image could be produced.
    async fn resize(
        &self,
        source: ImageSource,
        options: ResizeOptions,
        filter: FilterKind,
    ) -> Option<Bytes>;
}
