//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::entities::{
    Bounds, DEFAULT_BOUNDS_HEIGHT, DEFAULT_BOUNDS_WIDTH, DEFAULT_COMPRESSION_QUALITY,
    DEFAULT_RESIZE_THRESHOLD_BYTES, FilterKind, ResizeOptions,
};
use crate::infrastructure::image::memory_cache::{
    CacheSizing, DEFAULT_MEMORY_FRACTION, MIN_CACHE_BYTES, process_memory_bytes,
};

const APP_NAME: &str = "peekaboo";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "onseok";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory processed images are written to when no output path is given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Resize defaults.
    #[serde(default)]
    pub resize: ResizeConfig,

    /// Raster cache sizing.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Gallery paging.
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Resize defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Target bounding box width.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Target bounding box height.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Sources at or below this many bytes skip sampling and caching.
    #[serde(default = "default_threshold")]
    pub threshold_bytes: u64,

    /// JPEG quality in `[0, 1]`.
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// Filter applied when none is requested.
    #[serde(default)]
    pub filter: FilterKind,

    /// Maximum decodes running at once.
    #[serde(default = "default_concurrency")]
    pub max_concurrent_decodes: usize,
}

impl ResizeConfig {
    /// Builds the per-request resize options.
    #[must_use]
    pub fn options(&self) -> ResizeOptions {
        ResizeOptions::new(Bounds::new(self.width, self.height))
            .with_threshold(self.threshold_bytes)
            .with_quality(self.quality)
    }

    /// Applies per-request overrides on top of these defaults.
    #[must_use]
    pub fn resolve(&self, args: &ResizeArgs) -> (ResizeOptions, FilterKind) {
        let bounds = Bounds::new(
            args.width.unwrap_or(self.width),
            args.height.unwrap_or(self.height),
        );
        let options = ResizeOptions::new(bounds)
            .with_threshold(args.threshold.unwrap_or(self.threshold_bytes))
            .with_quality(args.quality.unwrap_or(self.quality));
        (options, args.filter.unwrap_or(self.filter))
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            threshold_bytes: default_threshold(),
            quality: default_quality(),
            filter: FilterKind::Default,
            max_concurrent_decodes: default_concurrency(),
        }
    }
}

/// Raster cache sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Share of process memory the cache may use.
    #[serde(default = "default_memory_fraction")]
    pub memory_fraction: f64,

    /// Memory available to the process in bytes; measured when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_memory_bytes: Option<u64>,

    /// Minimum capacity in bytes.
    #[serde(default = "default_floor")]
    pub floor_bytes: u64,
}

impl CacheConfig {
    /// Converts to cache sizing.
    #[must_use]
    pub fn sizing(&self) -> CacheSizing {
        CacheSizing {
            memory_fraction: self.memory_fraction,
            process_memory_bytes: self
                .process_memory_bytes
                .unwrap_or_else(process_memory_bytes),
            floor_bytes: self.floor_bytes,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_fraction: default_memory_fraction(),
            process_memory_bytes: None,
            floor_bytes: default_floor(),
        }
    }
}

/// Gallery paging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Entries per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

const fn default_width() -> u32 {
    DEFAULT_BOUNDS_WIDTH
}

const fn default_height() -> u32 {
    DEFAULT_BOUNDS_HEIGHT
}

const fn default_threshold() -> u64 {
    DEFAULT_RESIZE_THRESHOLD_BYTES
}

const fn default_quality() -> f64 {
    DEFAULT_COMPRESSION_QUALITY
}

const fn default_concurrency() -> usize {
    4
}

const fn default_memory_fraction() -> f64 {
    DEFAULT_MEMORY_FRACTION
}

const fn default_floor() -> u64 {
    MIN_CACHE_BYTES
}

const fn default_page_size() -> usize {
    30
}

use super::args::{CliArgs, ResizeArgs};

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(output_dir) = &args.output_dir {
            self.output_dir = Some(output_dir.clone());
        }
        if let Some(cache_fraction) = args.cache_fraction {
            self.cache.memory_fraction = cache_fraction;
        }
        if let Some(concurrency) = args.max_concurrent_decodes {
            self.resize.max_concurrent_decodes = concurrency;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("peekaboo.log"))
    }

    /// Returns default directory for saved images.
    #[must_use]
    pub fn default_output_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("images"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective output directory.
    #[must_use]
    pub fn effective_output_dir(&self) -> Option<PathBuf> {
        self.output_dir.clone().or_else(Self::default_output_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            output_dir: None,
            resize: ResizeConfig::default(),
            cache: CacheConfig::default(),
            gallery: GalleryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [resize]
            width = 1024
            quality = 0.8
            filter = "sepia"

            [cache]
            memory_fraction = 0.5
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.resize.width, 1024);
        assert_eq!(config.resize.height, DEFAULT_BOUNDS_HEIGHT);
        assert_eq!(config.resize.filter, FilterKind::Sepia);
        assert!((config.cache.memory_fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.cache.floor_bytes, MIN_CACHE_BYTES);
        assert_eq!(config.gallery.page_size, 30);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        let options = config.resize.options();

        assert_eq!(options, ResizeOptions::default());
        assert_eq!(config.cache.sizing(), CacheSizing::default());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_process_memory_override() {
        let config: AppConfig = toml::from_str("[cache]\nprocess_memory_bytes = 1073741824\n")
            .expect("Failed to parse config");
        let sizing = config.cache.sizing();

        assert_eq!(sizing.process_memory_bytes, 1 << 30);
        assert_eq!(sizing.capacity_bytes(), 256 * 1024 * 1024);
        assert_eq!(
            AppConfig::default().cache.sizing().process_memory_bytes,
            process_memory_bytes()
        );
    }

    #[test]
    fn test_resolve_prefers_request_values() {
        let config = ResizeConfig {
            filter: FilterKind::Invert,
            ..ResizeConfig::default()
        };
        let args = ResizeArgs {
            width: Some(320),
            quality: Some(0.5),
            ..ResizeArgs::default()
        };

        let (options, filter) = config.resolve(&args);

        assert_eq!(options.bounds, Bounds::new(320, DEFAULT_BOUNDS_HEIGHT));
        assert!((options.quality - 0.5).abs() < f64::EPSILON);
        assert_eq!(options.threshold_bytes, DEFAULT_RESIZE_THRESHOLD_BYTES);
        assert_eq!(filter, FilterKind::Invert);
    }

    #[test]
    fn test_merge_with_args_overrides() {
        let args = CliArgs::parse_from([
            "peekaboo",
            "--log-level",
            "trace",
            "--cache-fraction",
            "0.1",
            "gallery",
            "/tmp",
        ]);
        let mut config = AppConfig::default();
        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert!((config.cache.memory_fraction - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.resize.max_concurrent_decodes, 4);
    }
}
