//! Domain entity definitions.

mod bounds;
mod cache_key;
mod camera;
mod filter;
mod image_source;
mod media;
mod resize_options;
mod selection;

pub use bounds::{Bounds, DEFAULT_BOUNDS_HEIGHT, DEFAULT_BOUNDS_WIDTH};
pub use cache_key::CacheKey;
pub use camera::{AccessState, CameraMode, UnknownCameraMode};
pub use filter::{FilterKind, UnknownFilter};
pub use image_source::{ImageSource, SourceId};
pub use media::MediaImage;
pub use resize_options::{
    DEFAULT_COMPRESSION_QUALITY, DEFAULT_RESIZE_THRESHOLD_BYTES, ResizeOptions, clamp_quality,
};
pub use selection::SelectionMode;

/// Decoded pixel buffer shared read-only between the cache and callers.
pub type Raster = std::sync::Arc<image::DynamicImage>;
