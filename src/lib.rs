//! Peekaboo - portable image core for camera, picker and gallery components.
//!
//! This crate provides the per-image pipeline (sampled decode, EXIF
//! orientation, colour filters, JPEG re-encode) behind a memory-bounded
//! raster cache, plus the capability and gallery seams a host plugs into.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for images, media and config.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "peekaboo";
