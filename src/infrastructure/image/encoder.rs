//! Lossy re-encoding of final rasters.

use bytes::Bytes;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::trace;

use crate::domain::entities::clamp_quality;
use crate::domain::errors::{PipelineError, PipelineResult};

/// Lowest quality the JPEG codec accepts.
const MIN_JPEG_QUALITY: u8 = 1;

/// Maps a `[0.0, 1.0]` quality to the codec's `1..=100` scale.
///
/// Out of range input is clamped first, so any negative value behaves
/// like `0.0` and anything above one like `1.0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn jpeg_quality(quality: f64) -> u8 {
    let scaled = (100.0 * clamp_quality(quality)) as u8;
    scaled.max(MIN_JPEG_QUALITY)
}

/// Encodes `raster` as JPEG. Alpha is discarded.
///
/// # Errors
/// Returns error if the codec rejects the raster.
pub fn encode_jpeg(raster: &DynamicImage, quality: f64) -> PipelineResult<Bytes> {
    let quality = jpeg_quality(quality);
    let rgb = raster.to_rgb8();

    let mut buf = Vec::with_capacity(rgb.as_raw().len() / 4);
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| PipelineError::encode(e.to_string()))?;

    trace!(
        width = rgb.width(),
        height = rgb.height(),
        quality,
        size = buf.len(),
        "Encoded JPEG"
    );
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::image::test_support::gradient;
    use test_case::test_case;

    #[test_case(-1.0, 1 ; "negative_floors")]
    #[test_case(0.0, 1 ; "zero_floors")]
    #[test_case(0.5, 50 ; "half")]
    #[test_case(0.999, 99 ; "truncates")]
    #[test_case(1.0, 100 ; "one")]
    #[test_case(12.0, 100 ; "above_one")]
    fn test_jpeg_quality(input: f64, expected: u8) {
        assert_eq!(jpeg_quality(input), expected);
    }

    #[test]
    fn test_output_is_decodable_jpeg() -> PipelineResult<()> {
        let bytes = encode_jpeg(&gradient(40, 30), 0.8)?;

        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).map_err(|e| PipelineError::decode(e.to_string()))?;
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
        Ok(())
    }

    #[test]
    fn test_quality_below_zero_matches_zero() -> PipelineResult<()> {
        let raster = gradient(32, 32);
        assert_eq!(encode_jpeg(&raster, -5.0)?, encode_jpeg(&raster, 0.0)?);
        Ok(())
    }

    #[test]
    fn test_quality_above_one_matches_one() -> PipelineResult<()> {
        let raster = gradient(32, 32);
        assert_eq!(encode_jpeg(&raster, 3.0)?, encode_jpeg(&raster, 1.0)?);
        Ok(())
    }

    #[test]
    fn test_lower_quality_is_smaller() -> PipelineResult<()> {
        let raster = gradient(64, 64);
        let low = encode_jpeg(&raster, 0.1)?;
        let high = encode_jpeg(&raster, 1.0)?;
        assert!(low.len() < high.len());
        Ok(())
    }
}
