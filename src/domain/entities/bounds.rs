//! Target rendering bounds.

use std::fmt;

/// Default maximum width for resized images.
pub const DEFAULT_BOUNDS_WIDTH: u32 = 800;
/// Default maximum height for resized images.
pub const DEFAULT_BOUNDS_HEIGHT: u32 = 800;

/// Maximum rendering size as a (width, height) pair.
///
/// Components are never zero; zero inputs are raised to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Creates bounds, raising zero components to one.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Returns the maximum width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the maximum height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if `(width, height)` already fits inside these bounds.
    #[must_use]
    pub const fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDS_WIDTH, DEFAULT_BOUNDS_HEIGHT)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
