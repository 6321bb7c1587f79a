//! Colour-matrix filters.

use image::{DynamicImage, RgbaImage};

use crate::domain::entities::FilterKind;

const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

/// Warm tint applied after desaturation for sepia.
const SEPIA_SCALE: [f32; 4] = [1.0, 0.95, 0.82, 1.0];

/// A 4x5 row-major colour matrix over RGBA in the 0..=255 range.
///
/// Each output channel is `m[0]*R + m[1]*G + m[2]*B + m[3]*A + m[4]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix([f32; 20]);

impl ColorMatrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Negates colour channels and leaves alpha untouched.
    pub const INVERT: Self = Self([
        -1.0, 0.0, 0.0, 0.0, 255.0, //
        0.0, -1.0, 0.0, 0.0, 255.0, //
        0.0, 0.0, -1.0, 0.0, 255.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Creates a matrix from raw row-major values.
    #[must_use]
    pub const fn from_array(values: [f32; 20]) -> Self {
        Self(values)
    }

    /// Saturation matrix; `0.0` is fully gray, `1.0` the identity.
    #[must_use]
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let (r, g, b) = (LUMA_R * inv, LUMA_G * inv, LUMA_B * inv);
        Self([
            r + sat, g, b, 0.0, 0.0, //
            r, g + sat, b, 0.0, 0.0, //
            r, g, b + sat, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Per-channel scale.
    #[must_use]
    pub const fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([
            r, 0.0, 0.0, 0.0, 0.0, //
            0.0, g, 0.0, 0.0, 0.0, //
            0.0, 0.0, b, 0.0, 0.0, //
            0.0, 0.0, 0.0, a, 0.0,
        ])
    }

    /// Returns the matrix for `filter`, or None for the identity filter.
    #[must_use]
    pub fn for_filter(filter: FilterKind) -> Option<Self> {
        match filter {
            FilterKind::Default => None,
            FilterKind::GrayScale => Some(Self::saturation(0.0)),
            FilterKind::Sepia => {
                let [r, g, b, a] = SEPIA_SCALE;
                Some(Self::saturation(0.0).post_concat(&Self::scale(r, g, b, a)))
            }
            FilterKind::Invert => Some(Self::INVERT),
        }
    }

    /// Returns `post * self`: `self` is applied first, then `post`.
    #[must_use]
    pub fn post_concat(&self, post: &Self) -> Self {
        let (a, p) = (&self.0, &post.0);
        let mut out = [0.0f32; 20];
        for row in 0..4 {
            for col in 0..5 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += p[row * 5 + k] * a[k * 5 + col];
                }
                if col == 4 {
                    sum += p[row * 5 + 4];
                }
                out[row * 5 + col] = sum;
            }
        }
        Self(out)
    }

    /// Transforms one RGBA pixel.
    #[must_use]
    pub fn transform(&self, px: [u8; 4]) -> [u8; 4] {
        let m = &self.0;
        let [r, g, b, a] = px.map(f32::from);
        let mut out = [0u8; 4];
        for (row, channel) in out.iter_mut().enumerate() {
            let base = row * 5;
            let v = m[base] * r + m[base + 1] * g + m[base + 2] * b + m[base + 3] * a + m[base + 4];
            *channel = to_channel(v);
        }
        out
    }

    /// Applies the matrix to every pixel of an RGBA buffer in place.
    pub fn apply(&self, image: &mut RgbaImage) {
        for pixel in image.pixels_mut() {
            pixel.0 = self.transform(pixel.0);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Applies `filter` and returns the transformed raster.
///
/// The identity filter returns `raster` unchanged; every other filter
/// produces an RGBA8 raster of the same size.
#[must_use]
pub fn apply_filter(raster: DynamicImage, filter: FilterKind) -> DynamicImage {
    let Some(matrix) = ColorMatrix::for_filter(filter) else {
        return raster;
    };

    let mut rgba = raster.into_rgba8();
    matrix.apply(&mut rgba);
    DynamicImage::ImageRgba8(rgba)
}
