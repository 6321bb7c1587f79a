//! In-memory LRU raster cache implementation.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sysinfo::System;
use tracing::{debug, trace, warn};

use crate::domain::entities::{CacheKey, Raster};
use crate::domain::ports::RasterCachePort;

use super::lru::WeightedLru;

/// Default share of process memory given to the cache.
pub const DEFAULT_MEMORY_FRACTION: f64 = 0.25;
/// Process memory assumed when the host cannot be queried (256 MiB).
pub const FALLBACK_PROCESS_MEMORY_BYTES: u64 = 256 * 1024 * 1024;
/// Smallest capacity the cache is ever given (4 MiB).
pub const MIN_CACHE_BYTES: u64 = 4 * 1024 * 1024;

/// How the cache capacity is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheSizing {
    /// Share of `process_memory_bytes` to use, clamped into `[0, 1]`.
    pub memory_fraction: f64,
    /// Memory available to the process.
    pub process_memory_bytes: u64,
    /// Hard floor for the capacity.
    pub floor_bytes: u64,
}

impl CacheSizing {
    /// Capacity in bytes: the memory share, but never below the floor.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn capacity_bytes(&self) -> u64 {
        let fraction = if self.memory_fraction.is_nan() {
            0.0
        } else {
            self.memory_fraction.clamp(0.0, 1.0)
        };
        let share = (self.process_memory_bytes as f64 * fraction) as u64;
        share.max(self.floor_bytes)
    }
}

/// Memory the process may use: the cgroup limit when one is set and lower
/// than physical memory, otherwise physical memory. None if neither can be
/// read.
#[must_use]
pub fn detect_process_memory() -> Option<u64> {
    static DETECTED: OnceLock<Option<u64>> = OnceLock::new();
    *DETECTED.get_or_init(|| {
        let mut sys = System::new();
        sys.refresh_memory();
        let physical = Some(sys.total_memory()).filter(|&b| b > 0);
        let limit = sys
            .cgroup_limits()
            .map(|limits| limits.total_memory)
            .filter(|&b| b > 0);

        let detected = match (limit, physical) {
            (Some(limit), Some(physical)) => Some(limit.min(physical)),
            (limit, physical) => limit.or(physical),
        };
        match detected {
            Some(bytes) => debug!(bytes, "Detected process memory"),
            None => warn!(
                fallback = FALLBACK_PROCESS_MEMORY_BYTES,
                "Could not detect process memory"
            ),
        }
        detected
    })
}

/// Measured process memory, or [`FALLBACK_PROCESS_MEMORY_BYTES`].
#[must_use]
pub fn process_memory_bytes() -> u64 {
    detect_process_memory().unwrap_or(FALLBACK_PROCESS_MEMORY_BYTES)
}

impl Default for CacheSizing {
    fn default() -> Self {
        Self {
            memory_fraction: DEFAULT_MEMORY_FRACTION,
            process_memory_bytes: process_memory_bytes(),
            floor_bytes: MIN_CACHE_BYTES,
        }
    }
}

/// In-memory LRU cache for decoded and filtered rasters, bounded by the
/// total size of their pixel buffers.
pub struct MemoryRasterCache {
    cache: Mutex<WeightedLru<CacheKey, Raster>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryRasterCache {
    /// Creates a cache holding at most `capacity_bytes` of pixel data.
    #[must_use]
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            cache: Mutex::new(WeightedLru::new(capacity_bytes)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache sized from `sizing`.
    #[must_use]
    pub fn with_sizing(sizing: CacheSizing) -> Self {
        let capacity = usize::try_from(sizing.capacity_bytes()).unwrap_or(usize::MAX);
        Self::new(capacity)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let cache = self.cache.lock();
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: cache.len(),
            weight_bytes: cache.weight(),
            capacity_bytes: cache.capacity(),
        }
    }

    /// Peeks at a raster without promoting it in the LRU.
    #[must_use]
    pub fn peek(&self, key: &CacheKey) -> Option<Raster> {
        self.cache.lock().peek(key).cloned()
    }

    /// Removes every raster.
    pub fn clear(&self) {
        self.cache.lock().clear();
        debug!("Cleared raster cache");
    }
}

impl Default for MemoryRasterCache {
    fn default() -> Self {
        Self::with_sizing(CacheSizing::default())
    }
}

/// Byte weight of a raster's pixel buffer.
#[must_use]
pub fn raster_weight(raster: &Raster) -> usize {
    raster.as_bytes().len()
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached rasters.
    pub size: usize,
    /// Bytes of pixel data held.
    pub weight_bytes: usize,
    /// Maximum bytes of pixel data.
    pub capacity_bytes: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} rasters, {}/{} bytes, {:.1}% hit rate ({} hits, {} misses)",
            self.size,
            self.weight_bytes,
            self.capacity_bytes,
            self.hit_rate,
            self.hits,
            self.misses
        )
    }
}

impl RasterCachePort for MemoryRasterCache {
    fn get(&self, key: &CacheKey) -> Option<Raster> {
        let found = self.cache.lock().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Raster cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Raster cache miss");
        }
        found
    }

    fn put(&self, key: CacheKey, raster: Raster) {
        let weight = raster_weight(&raster);
        debug!(key = %key, weight, "Storing raster in memory cache");
        let evicted = self.cache.lock().put(key, raster, weight);
        for (key, _) in &evicted {
            debug!(key = %key, "Evicted raster from memory cache");
        }
    }

    fn len(&self) -> usize {
        self.cache.lock().len()
    }
}
