mod gallery_port;
mod image_resizer_port;
mod media_capability_port;
mod raster_cache_port;

pub use gallery_port::GalleryPort;
pub use image_resizer_port::ImageResizerPort;
pub use media_capability_port::MediaCapabilityPort;
pub use raster_cache_port::RasterCachePort;

#[cfg(test)]
pub mod mocks {
    pub use super::gallery_port::mock::MockGallery;
    pub use super::image_resizer_port::mock::EchoResizer;
    pub use super::media_capability_port::mock::MockMediaCapability;
    pub use super::raster_cache_port::mock::RecordingCache;
}
