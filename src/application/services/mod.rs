//! Application services.

mod gallery_pager;
mod picker_launcher;

pub use gallery_pager::{GalleryPage, GalleryPager};
pub use picker_launcher::PickerLauncher;
