//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, CacheConfig, GalleryConfig, LogLevel, ResizeConfig};
pub use args::{CliArgs, Command, ResizeArgs};
pub use storage::StorageManager;
