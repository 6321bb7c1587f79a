//! Port definition for raster caching.

use crate::domain::entities::{CacheKey, Raster};

/// Port for the shared raster cache.
///
/// Called from blocking worker threads, so methods are synchronous.
/// Implementations must be thread-safe.
pub trait RasterCachePort: Send + Sync {
    /// Returns the cached raster and marks it most recently used.
    fn get(&self, key: &CacheKey) -> Option<Raster>;

    /// Inserts a raster, evicting least recently used entries as needed.
    fn put(&self, key: CacheKey, raster: Raster);

    /// Returns the number of cached rasters.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
