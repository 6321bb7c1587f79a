//! Capture image use case implementation.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::domain::entities::{CameraMode, FilterKind, ResizeOptions};
use crate::domain::errors::MediaError;
use crate::domain::ports::{ImageResizerPort, MediaCapabilityPort};

/// Captures a still image and runs it through the resize pipeline.
#[derive(Clone)]
pub struct CaptureImageUseCase {
    media_port: Arc<dyn MediaCapabilityPort>,
    resizer_port: Arc<dyn ImageResizerPort>,
}

impl CaptureImageUseCase {
    /// Creates new capture image use case.
    #[must_use]
    pub fn new(
        media_port: Arc<dyn MediaCapabilityPort>,
        resizer_port: Arc<dyn ImageResizerPort>,
    ) -> Self {
        Self {
            media_port,
            resizer_port,
        }
    }

    /// Captures with `mode` and returns the processed bytes.
    /// `Ok(None)` means the capture succeeded but produced no image.
    ///
    /// # Errors
    /// Returns error if access is refused or the camera fails.
    pub async fn execute(
        &self,
        mode: CameraMode,
        options: ResizeOptions,
        filter: FilterKind,
    ) -> Result<Option<Bytes>, MediaError> {
        let access = self.media_port.request_access().await;
        if !access.is_authorized() {
            warn!(?access, "Camera access not granted");
            return Err(MediaError::denied("camera"));
        }

        let source = self.media_port.capture(mode).await?;
        debug!(%mode, source = %source, "Captured image");
        Ok(self.resizer_port.resize(source, options, filter).await)
    }
}
