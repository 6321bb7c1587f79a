//! Options controlling the resize pipeline.

use super::Bounds;

/// Files at or below this size are re-encoded without downsampling.
pub const DEFAULT_RESIZE_THRESHOLD_BYTES: u64 = 1024 * 1024;

/// Default lossy compression quality.
pub const DEFAULT_COMPRESSION_QUALITY: f64 = 1.0;

/// Parameters for a single resize request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    /// Maximum output size.
    pub bounds: Bounds,
    /// Source size above which the image is downsampled.
    pub threshold_bytes: u64,
    /// Compression quality in `[0.0, 1.0]`; out of range values are clamped.
    pub quality: f64,
}

impl ResizeOptions {
    /// Creates options with the given bounds and default threshold and quality.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Sets the resize threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold_bytes: u64) -> Self {
        self.threshold_bytes = threshold_bytes;
        self
    }

    /// Sets the compression quality.
    #[must_use]
    pub const fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    /// Returns the quality clamped into `[0.0, 1.0]`.
    #[must_use]
    pub fn clamped_quality(&self) -> f64 {
        clamp_quality(self.quality)
    }
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            threshold_bytes: DEFAULT_RESIZE_THRESHOLD_BYTES,
            quality: DEFAULT_COMPRESSION_QUALITY,
        }
    }
}

/// Clamps a compression quality into `[0.0, 1.0]`. NaN maps to zero.
#[must_use]
pub fn clamp_quality(quality: f64) -> f64 {
    if quality.is_nan() {
        0.0
    } else {
        quality.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(-3.0, 0.0 ; "negative")]
    #[test_case(0.0, 0.0 ; "zero")]
    #[test_case(0.42, 0.42 ; "in_range")]
    #[test_case(1.0, 1.0 ; "one")]
    #[test_case(7.5, 1.0 ; "above")]
    #[test_case(f64::NAN, 0.0 ; "nan")]
    fn test_clamp_quality(input: f64, expected: f64) {
        assert!((clamp_quality(input) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_defaults() {
        let options = ResizeOptions::default();
        assert_eq!(options.bounds, Bounds::new(800, 800));
        assert_eq!(options.threshold_bytes, 1_048_576);
        assert!((options.quality - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builders() {
        let options = ResizeOptions::new(Bounds::new(10, 20))
            .with_threshold(0)
            .with_quality(2.0);
        assert_eq!(options.threshold_bytes, 0);
        assert!((options.clamped_quality() - 1.0).abs() < f64::EPSILON);
    }
}
