//! Image pipeline infrastructure.
//!
//! This module provides:
//! - Power-of-two sampled decoding
//! - EXIF orientation normalization
//! - Colour-matrix filters
//! - JPEG re-encoding
//! - Memory-bounded LRU raster caching
//! - The cached resize pipeline tying these together

pub mod encoder;
pub mod filter;
pub mod lru;
pub mod memory_cache;
pub mod orientation;
pub mod pipeline;
pub mod sampler;

pub use encoder::{encode_jpeg, jpeg_quality};
pub use filter::{ColorMatrix, apply_filter};
pub use lru::WeightedLru;
pub use memory_cache::{CacheSizing, CacheStats, MemoryRasterCache, detect_process_memory};
pub use orientation::{normalize, read_orientation};
pub use pipeline::{ImagePipeline, ImagePipelineConfig};
pub use sampler::{
    decode_full, decode_jpeg_scaled, decode_limits, decode_sampled, read_dimensions, sample_factor,
};
