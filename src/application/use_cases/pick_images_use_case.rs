//! Pick images use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{PickRequest, PickResponse};
use crate::application::services::PickerLauncher;
use crate::domain::errors::MediaError;
use crate::domain::ports::{ImageResizerPort, MediaCapabilityPort};

/// Handles the pick, resize and deliver workflow.
#[derive(Clone)]
pub struct PickImagesUseCase {
    media_port: Arc<dyn MediaCapabilityPort>,
    resizer_port: Arc<dyn ImageResizerPort>,
    launcher: Arc<PickerLauncher>,
}

impl PickImagesUseCase {
    /// Creates new pick images use case.
    #[must_use]
    pub fn new(
        media_port: Arc<dyn MediaCapabilityPort>,
        resizer_port: Arc<dyn ImageResizerPort>,
    ) -> Self {
        Self {
            media_port,
            resizer_port,
            launcher: Arc::new(PickerLauncher::new()),
        }
    }

    /// Executes a pick with the provided request.
    ///
    /// # Errors
    /// Returns error if a pick is already running, access is refused, or
    /// the provider fails to list media.
    pub async fn execute(&self, request: PickRequest) -> Result<PickResponse, MediaError> {
        if !self.launcher.launch() {
            warn!("Pick requested while another is in progress");
            return Err(MediaError::PickerBusy);
        }

        let result = self.pick_and_resize(request).await;
        self.launcher.mark_inactive();
        result
    }

    /// Returns true while a pick is running.
    #[must_use]
    pub fn is_picking(&self) -> bool {
        self.launcher.is_active()
    }

    async fn pick_and_resize(&self, request: PickRequest) -> Result<PickResponse, MediaError> {
        let access = self.media_port.request_access().await;
        if !access.is_authorized() {
            warn!(?access, "Media access not granted");
            return Err(MediaError::denied("media library"));
        }

        let sources = self.media_port.pick_media(request.selection).await?;
        debug!(count = sources.len(), selection = ?request.selection, "Media picked");

        let selected = sources.len();
        let tasks = sources.into_iter().map(|source| {
            self.resizer_port
                .resize(source, request.resize, request.filter)
        });
        let images: Vec<_> = futures_util::future::join_all(tasks)
            .await
            .into_iter()
            .flatten()
            .collect();

        let dropped = selected - images.len();
        if dropped > 0 {
            warn!(dropped, "Some picked images could not be processed");
        }
        info!(delivered = images.len(), filter = %request.filter, "Pick completed");

        Ok(PickResponse { images, dropped })
    }
}
