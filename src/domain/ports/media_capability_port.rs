//! Port for host media capabilities.

use async_trait::async_trait;

use crate::domain::entities::{AccessState, CameraMode, ImageSource, SelectionMode};
use crate::domain::errors::MediaError;

/// Capabilities a host platform provides to obtain images.
#[async_trait]
pub trait MediaCapabilityPort: Send + Sync {
    /// Requests access to the user's media.
    async fn request_access(&self) -> AccessState;

    /// Captures a still image with the given camera.
    async fn capture(&self, mode: CameraMode) -> Result<ImageSource, MediaError>;

    /// Lets the user pick images; an empty list means the pick was dismissed.
    async fn pick_media(&self, mode: SelectionMode) -> Result<Vec<ImageSource>, MediaError>;
}
