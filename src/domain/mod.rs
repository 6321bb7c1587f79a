//! Domain layer with core image entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Bounds, CacheKey, FilterKind, ImageSource, Raster, ResizeOptions};
pub use errors::{MediaError, PipelineError, PipelineResult};
pub use ports::{GalleryPort, ImageResizerPort, MediaCapabilityPort, RasterCachePort};
