//! Gallery backed by a local directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::MediaImage;
use crate::domain::errors::MediaError;
use crate::domain::ports::GalleryPort;

use super::scan::scan_images;

/// Lists the images of one directory, newest first.
///
/// The directory is rescanned on every call so new captures appear
/// without invalidation.
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    root: PathBuf,
}

impl DirectoryGallery {
    /// Creates a gallery over `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the scanned directory.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl GalleryPort for DirectoryGallery {
    async fn count(&self) -> Result<usize, MediaError> {
        Ok(scan_images(&self.root).await?.len())
    }

    async fn fetch_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<MediaImage>, MediaError> {
        let page: Vec<_> = scan_images(&self.root)
            .await?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();
        debug!(root = %self.root.display(), limit, offset, found = page.len(), "Fetched gallery page");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(n: usize) -> Result<tempfile::TempDir, std::io::Error> {
        let dir = tempfile::tempdir()?;
        for i in 0..n {
            std::fs::write(dir.path().join(format!("img_{i:02}.jpg")), b"x")?;
        }
        std::fs::write(dir.path().join("readme.md"), b"x")?;
        Ok(dir)
    }

    #[tokio::test]
    async fn test_count_ignores_non_images() -> Result<(), Box<dyn std::error::Error>> {
        let dir = populate(5)?;
        let gallery = DirectoryGallery::new(dir.path());
        assert_eq!(gallery.count().await?, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_pages_cover_every_image_once() -> Result<(), Box<dyn std::error::Error>> {
        let dir = populate(7)?;
        let gallery = DirectoryGallery::new(dir.path());

        let mut seen = Vec::new();
        for page in 0..3 {
            seen.extend(gallery.fetch_page(3, page * 3).await?);
        }
        assert_eq!(seen.len(), 7);
        seen.sort_by(|a, b| a.name.cmp(&b.name));
        seen.dedup_by(|a, b| a.id == b.id);
        assert_eq!(seen.len(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_offset() -> Result<(), Box<dyn std::error::Error>> {
        let dir = populate(2)?;
        let gallery = DirectoryGallery::new(dir.path());

        assert!(gallery.get_by_offset(1).await?.is_some());
        assert!(gallery.get_by_offset(2).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let gallery = DirectoryGallery::new("/no/such/gallery");
        assert!(matches!(gallery.count().await, Err(MediaError::Io(_))));
    }
}
