//! Directory-backed media adapters.
//!
//! This module provides:
//! - A paged gallery over a local directory
//! - A pick/capture capability provider over the same layout

pub mod directory_gallery;
pub mod directory_media;
pub mod scan;

pub use directory_gallery::DirectoryGallery;
pub use directory_media::DirectoryMediaProvider;
pub use scan::{IMAGE_EXTENSIONS, is_image_path, scan_images};
