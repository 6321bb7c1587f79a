//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateless and guard services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{PickRequest, PickResponse};
pub use services::{GalleryPage, GalleryPager, PickerLauncher};
pub use use_cases::{CaptureImageUseCase, PickImagesUseCase};
