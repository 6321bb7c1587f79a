//! Port for paged gallery access.

use async_trait::async_trait;

use crate::domain::entities::MediaImage;
use crate::domain::errors::MediaError;

/// Port over a device's image collection, newest first.
#[async_trait]
pub trait GalleryPort: Send + Sync {
    /// Returns the total number of images.
    async fn count(&self) -> Result<usize, MediaError>;

    /// Returns up to `limit` images starting at `offset`.
    async fn fetch_page(&self, limit: usize, offset: usize)
    -> Result<Vec<MediaImage>, MediaError>;

    /// Returns the image at `offset`, if any.
    async fn get_by_offset(&self, offset: usize) -> Result<Option<MediaImage>, MediaError> {
        Ok(self.fetch_page(1, offset).await?.into_iter().next())
    }
}
