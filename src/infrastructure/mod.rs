//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image decoding, processing and caching.
pub mod image;
/// Directory-backed media adapters.
pub mod media;

pub use config::{AppConfig, CliArgs, Command, LogLevel, ResizeArgs, StorageManager};
pub use image::{CacheStats, ImagePipeline, ImagePipelineConfig, MemoryRasterCache};
pub use media::{DirectoryGallery, DirectoryMediaProvider};
