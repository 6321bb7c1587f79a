//! Resize pipeline orchestrator.
//!
//! Implements a two-tier lookup: filtered result -> decoded raster -> source.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Semaphore;
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{CacheKey, FilterKind, ImageSource, Raster, ResizeOptions};
use crate::domain::errors::PipelineResult;
use crate::domain::ports::{ImageResizerPort, RasterCachePort};

use super::encoder::encode_jpeg;
use super::filter::apply_filter;
use super::memory_cache::{CacheSizing, MemoryRasterCache};
use super::orientation::{normalize, read_orientation};
use super::sampler::{decode_full, decode_sampled};

/// Configuration for the image pipeline.
#[derive(Debug, Clone)]
pub struct ImagePipelineConfig {
    /// Sizing of the shared raster cache.
    pub cache_sizing: CacheSizing,
    /// Maximum decodes running at once on the blocking pool.
    pub max_concurrent_decodes: usize,
}

impl Default for ImagePipelineConfig {
    fn default() -> Self {
        Self {
            cache_sizing: CacheSizing::default(),
            max_concurrent_decodes: 4,
        }
    }
}

/// Decodes, orients, filters and re-encodes images, sharing work through
/// a raster cache.
#[derive(Clone)]
pub struct ImagePipeline {
    cache: Arc<dyn RasterCachePort>,
    permits: Arc<Semaphore>,
}

impl std::fmt::Debug for ImagePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePipeline")
            .field("cached", &self.cache.len())
            .field("available_permits", &self.permits.available_permits())
            .finish()
    }
}

impl ImagePipeline {
    /// Creates a pipeline over an existing cache.
    #[must_use]
    pub fn new(cache: Arc<dyn RasterCachePort>, max_concurrent_decodes: usize) -> Self {
        Self {
            cache,
            permits: Arc::new(Semaphore::new(max_concurrent_decodes.max(1))),
        }
    }

    /// Creates a pipeline with its own memory cache.
    #[must_use]
    pub fn with_config(config: &ImagePipelineConfig) -> Self {
        let cache = Arc::new(MemoryRasterCache::with_sizing(config.cache_sizing));
        Self::new(cache, config.max_concurrent_decodes)
    }

    /// Runs the pipeline on the calling thread. Failures yield None.
    #[must_use]
    pub fn resize_blocking(
        &self,
        source: &ImageSource,
        options: &ResizeOptions,
        filter: FilterKind,
    ) -> Option<Bytes> {
        match self.try_resize(source, options, filter) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(source = %source, stage = e.stage(), error = %e, "Image pipeline failed");
                None
            }
        }
    }

    /// Runs the pipeline, surfacing the failing step.
    ///
    /// # Errors
    /// Returns error if the source cannot be read, decoded or encoded.
    pub fn try_resize(
        &self,
        source: &ImageSource,
        options: &ResizeOptions,
        filter: FilterKind,
    ) -> PipelineResult<Bytes> {
        let size = source.size_bytes()?;
        if size <= options.threshold_bytes {
            debug!(
                source = %source,
                size,
                threshold = options.threshold_bytes,
                "Below resize threshold, re-encoding at full size"
            );
            let bytes = source.read_bytes()?;
            let raster = normalize(decode_full(&bytes)?, read_orientation(&bytes));
            return encode_jpeg(&apply_filter(raster, filter), options.quality);
        }

        let decoded_key = CacheKey::decoded(source.id(), options.bounds);
        let filtered_key = decoded_key.with_filter(filter);

        if let Some(cached) = self.cache.get(&filtered_key) {
            trace!(key = %filtered_key, "Serving filtered raster from cache");
            return encode_jpeg(&cached, options.quality);
        }

        let bytes = source.read_bytes()?;
        let decoded = self.decoded_raster(&decoded_key, &bytes)?;

        let oriented = normalize((*decoded).clone(), read_orientation(&bytes));
        let filtered = apply_filter(oriented, filter);
        let encoded = encode_jpeg(&filtered, options.quality)?;

        self.cache.put(filtered_key, Arc::new(filtered));
        Ok(encoded)
    }

    fn decoded_raster(&self, key: &CacheKey, bytes: &[u8]) -> PipelineResult<Raster> {
        if let Some(cached) = self.cache.get(key) {
            trace!(key = %key, "Reusing decoded raster");
            return Ok(cached);
        }

        let (raster, factor) = decode_sampled(bytes, key.bounds())?;
        debug!(
            key = %key,
            factor,
            width = raster.width(),
            height = raster.height(),
            "Decoded source image"
        );
        let raster = Arc::new(raster);
        self.cache.put(key.clone(), raster.clone());
        Ok(raster)
    }

    /// Resizes several sources concurrently, dropping failures and
    /// preserving input order.
    pub async fn resize_batch(
        &self,
        sources: Vec<ImageSource>,
        options: ResizeOptions,
        filter: FilterKind,
    ) -> Vec<Bytes> {
        let tasks = sources
            .into_iter()
            .map(|source| self.resize(source, options, filter));
        futures_util::future::join_all(tasks)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

#[async_trait]
impl ImageResizerPort for ImagePipeline {
    async fn resize(
        &self,
        source: ImageSource,
        options: ResizeOptions,
        filter: FilterKind,
    ) -> Option<Bytes> {
        let Ok(permit) = self.permits.clone().acquire_owned().await else {
            error!("Decode semaphore closed");
            return None;
        };

        let pipeline = self.clone();
        let result = tokio::task::spawn_blocking(move || {
            let result = pipeline.resize_blocking(&source, &options, filter);
            drop(permit);
            result
        })
        .await;

        match result {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Resize task panicked");
                None
            }
        }
    }
}
