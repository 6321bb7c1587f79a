//! Media capabilities backed by a local directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::entities::{AccessState, CameraMode, ImageSource, SelectionMode};
use crate::domain::errors::MediaError;
use crate::domain::ports::MediaCapabilityPort;

use super::scan::scan_images;

/// Serves picks from a directory and stores processed images back into it.
///
/// There is no camera on this provider; capture requests are refused.
#[derive(Debug, Clone)]
pub struct DirectoryMediaProvider {
    root: PathBuf,
}

impl DirectoryMediaProvider {
    /// Creates a provider over `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the backing directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes encoded image bytes under a fresh unique name.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or written.
    pub async fn save_image(&self, bytes: &[u8]) -> Result<PathBuf, MediaError> {
        fs::create_dir_all(&self.root).await?;
        let path = self.root.join(format!("{}.jpg", uuid::Uuid::new_v4()));
        fs::write(&path, bytes).await?;
        info!(path = %path.display(), size = bytes.len(), "Saved image");
        Ok(path)
    }
}

#[async_trait]
impl MediaCapabilityPort for DirectoryMediaProvider {
    async fn request_access(&self) -> AccessState {
        match fs::read_dir(&self.root).await {
            Ok(_) => AccessState::Authorized,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Media directory not accessible");
                AccessState::Denied
            }
        }
    }

    async fn capture(&self, mode: CameraMode) -> Result<ImageSource, MediaError> {
        debug!(%mode, "Capture requested from directory provider");
        Err(MediaError::unsupported("camera capture"))
    }

    async fn pick_media(&self, mode: SelectionMode) -> Result<Vec<ImageSource>, MediaError> {
        if !self.request_access().await.is_authorized() {
            return Err(MediaError::denied("media library"));
        }

        let picked: Vec<_> = mode
            .apply(scan_images(&self.root).await?)
            .into_iter()
            .map(|media| media.source())
            .collect();
        debug!(root = %self.root.display(), ?mode, count = picked.len(), "Picked media");
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_access_follows_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        assert_eq!(
            DirectoryMediaProvider::new(dir.path()).request_access().await,
            AccessState::Authorized
        );
        assert_eq!(
            DirectoryMediaProvider::new(dir.path().join("missing"))
                .request_access()
                .await,
            AccessState::Denied
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_pick_respects_selection_mode() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        for i in 0..4 {
            std::fs::write(dir.path().join(format!("{i}.png")), b"x")?;
        }
        let provider = DirectoryMediaProvider::new(dir.path());

        assert_eq!(provider.pick_media(SelectionMode::Single).await?.len(), 1);
        assert_eq!(
            provider
                .pick_media(SelectionMode::Multiple { max_selection: 3 })
                .await?
                .len(),
            3
        );
        assert_eq!(provider.pick_media(SelectionMode::unlimited()).await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_pick_without_access_is_denied() {
        let provider = DirectoryMediaProvider::new("/no/such/library");
        let result = provider.pick_media(SelectionMode::Single).await;
        assert!(matches!(result, Err(MediaError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_capture_is_unsupported() {
        let provider = DirectoryMediaProvider::new("/tmp");
        let result = provider.capture(CameraMode::Back).await;
        assert!(matches!(result, Err(MediaError::Unsupported { .. })));
    }

    #[tokio::test]
    async fn test_save_image_creates_unique_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let provider = DirectoryMediaProvider::new(dir.path().join("out"));

        let a = provider.save_image(b"one").await?;
        let b = provider.save_image(b"two").await?;

        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a)?, b"one");
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("jpg"));
        Ok(())
    }
}
