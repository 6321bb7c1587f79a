//! Use case implementations.

mod capture_image_use_case;
mod pick_images_use_case;

pub use capture_image_use_case::CaptureImageUseCase;
pub use pick_images_use_case::PickImagesUseCase;
