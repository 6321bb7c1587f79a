//! Page-keyed loading over a gallery port.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::MediaImage;
use crate::domain::errors::MediaError;
use crate::domain::ports::GalleryPort;

/// One loaded page of gallery entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPage {
    /// Entries of this page.
    pub data: Vec<MediaImage>,
    /// Key of the previous page, None on the first page.
    pub prev_key: Option<usize>,
    /// Key of the next page, None once a page comes back empty.
    pub next_key: Option<usize>,
}

/// Loads gallery pages by page number.
#[derive(Clone)]
pub struct GalleryPager {
    gallery: Arc<dyn GalleryPort>,
}

impl GalleryPager {
    /// Creates a pager over `gallery`.
    #[must_use]
    pub fn new(gallery: Arc<dyn GalleryPort>) -> Self {
        Self { gallery }
    }

    /// Loads page `key` (default 0) holding up to `load_size` entries.
    ///
    /// # Errors
    /// Returns error if the gallery cannot be queried.
    pub async fn load(
        &self,
        key: Option<usize>,
        load_size: usize,
    ) -> Result<GalleryPage, MediaError> {
        let page = key.unwrap_or(0);
        let offset = page.saturating_mul(load_size);
        let data = self.gallery.fetch_page(load_size, offset).await?;

        let prev_key = page.checked_sub(1);
        let next_key = if data.is_empty() { None } else { Some(page + 1) };
        debug!(page, load_size, loaded = data.len(), "Loaded gallery page");

        Ok(GalleryPage {
            data,
            prev_key,
            next_key,
        })
    }

    /// Returns the page containing `anchor_position`, used to resume after
    /// a refresh.
    #[must_use]
    pub fn refresh_key(anchor_position: Option<usize>, page_size: usize) -> Option<usize> {
        let anchor = anchor_position?;
        if page_size == 0 {
            return None;
        }
        Some(anchor / page_size)
    }

    /// Returns the total number of gallery entries.
    ///
    /// # Errors
    /// Returns error if the gallery cannot be queried.
    pub async fn count(&self) -> Result<usize, MediaError> {
        self.gallery.count().await
    }
}
