//! Power-of-two downsampling decoder.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{
    DynamicImage, GrayImage, ImageBuffer, ImageFormat, ImageReader, Limits, Luma, RgbImage,
};
use jpeg_decoder::PixelFormat;
use tracing::{debug, trace};

use crate::domain::entities::Bounds;
use crate::domain::errors::{PipelineError, PipelineResult};

/// Returns the smallest power of two `f` with `width/f <= bounds.width`
/// and `height/f <= bounds.height`, using integer division.
#[must_use]
pub fn sample_factor(width: u32, height: u32, bounds: Bounds) -> u32 {
    let (width, height) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(bounds.width()), u64::from(bounds.height()));

    let mut factor: u64 = 1;
    while width / factor > max_w || height / factor > max_h {
        factor *= 2;
    }

    u32::try_from(factor).unwrap_or(u32::MAX)
}

/// Widest pixel the `image` crate decodes into (RGBA, 32-bit float).
const MAX_BYTES_PER_PIXEL: u64 = 16;

fn reader(bytes: &[u8]) -> PipelineResult<ImageReader<Cursor<&[u8]>>> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::decode(e.to_string()))
}

/// Reads the encoded dimensions without decoding pixel data.
///
/// # Errors
/// Returns error if the format is unknown or the header is corrupt.
pub fn read_dimensions(bytes: &[u8]) -> PipelineResult<(u32, u32)> {
    reader(bytes)?
        .into_dimensions()
        .map_err(|e| PipelineError::decode(format!("failed to read header: {e}")))
}

/// Decoder limits sized for a `width` x `height` source.
///
/// The default allocation cap rejects large photos outright; here the
/// cap follows the declared dimensions, and the decoder may not report a
/// bigger frame than the header did.
#[must_use]
pub fn decode_limits(width: u32, height: u32) -> Limits {
    let frame = u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(MAX_BYTES_PER_PIXEL);
    let mut limits = Limits::default();
    limits.max_image_width = Some(width);
    limits.max_image_height = Some(height);
    limits.max_alloc = Some(frame.saturating_mul(2).max(limits.max_alloc.unwrap_or(0)));
    limits
}

/// Decodes at full resolution.
///
/// # Errors
/// Returns error if the image cannot be decoded.
pub fn decode_full(bytes: &[u8]) -> PipelineResult<DynamicImage> {
    let (width, height) = read_dimensions(bytes)?;
    let mut reader = reader(bytes)?;
    reader.limits(decode_limits(width, height));
    reader
        .decode()
        .map_err(|e| PipelineError::decode(e.to_string()))
}

/// Decodes `bytes` reduced by the sample factor for `bounds`.
///
/// JPEG sources are decoded at the largest DCT scale (1/2, 1/4 or 1/8)
/// that does not go below the target, so the full frame is never
/// materialised; other formats decode at full size. Either way the raster
/// is then resized to exactly `max(1, W/f)` x `max(1, H/f)`.
///
/// Returns the raster together with the factor that was applied.
///
/// # Errors
/// Returns error if the header or pixel data cannot be decoded.
pub fn decode_sampled(bytes: &[u8], bounds: Bounds) -> PipelineResult<(DynamicImage, u32)> {
    let (width, height) = read_dimensions(bytes)?;
    let factor = sample_factor(width, height, bounds);
    trace!(width, height, bounds = %bounds, factor, "Computed sample factor");

    if factor == 1 {
        return Ok((decode_full(bytes)?, factor));
    }

    let target_w = (width / factor).max(1);
    let target_h = (height / factor).max(1);

    let decoded = match reader(bytes)?.format() {
        Some(ImageFormat::Jpeg) => match decode_jpeg_scaled(bytes, target_w, target_h)? {
            Some(raster) => raster,
            None => decode_full(bytes)?,
        },
        _ => decode_full(bytes)?,
    };

    debug!(
        from = %format!("{width}x{height}"),
        decoded = %format!("{}x{}", decoded.width(), decoded.height()),
        to = %format!("{target_w}x{target_h}"),
        factor,
        "Downsampling decoded image"
    );

    if decoded.width() == target_w && decoded.height() == target_h {
        return Ok((decoded, factor));
    }
    Ok((
        decoded.resize_exact(target_w, target_h, FilterType::Triangle),
        factor,
    ))
}

/// Decodes a JPEG with DCT scaling, producing a raster at least as large
/// as `target_w` x `target_h` on one axis.
///
/// Returns None for pixel formats that need the full decoder (CMYK).
///
/// # Errors
/// Returns error if the JPEG stream is corrupt.
pub fn decode_jpeg_scaled(
    bytes: &[u8],
    target_w: u32,
    target_h: u32,
) -> PipelineResult<Option<DynamicImage>> {
    let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(bytes));
    let (width, height) = decoder
        .scale(
            u16::try_from(target_w).unwrap_or(u16::MAX),
            u16::try_from(target_h).unwrap_or(u16::MAX),
        )
        .map_err(|e| PipelineError::decode(format!("failed to read JPEG header: {e}")))?;
    let pixels = decoder
        .decode()
        .map_err(|e| PipelineError::decode(e.to_string()))?;
    let format = decoder
        .info()
        .map(|info| info.pixel_format)
        .ok_or_else(|| PipelineError::decode("JPEG header missing after decode"))?;

    let (width, height) = (u32::from(width), u32::from(height));
    let raster = match format {
        PixelFormat::L8 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        PixelFormat::RGB24 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        PixelFormat::L16 => {
            let samples = pixels
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width, height, samples)
                .map(DynamicImage::ImageLuma16)
        }
        PixelFormat::CMYK32 => return Ok(None),
    };

    raster
        .map(Some)
        .ok_or_else(|| PipelineError::decode("JPEG pixel buffer does not match its size"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::image::test_support::{encode_plain_jpeg, encode_png};
    use test_case::test_case;

    #[test_case(4000, 3000, 800, 800, 8 ; "landscape_photo")]
    #[test_case(800, 800, 800, 800, 1 ; "exact_fit")]
    #[test_case(10, 10, 800, 800, 1 ; "already_small")]
    #[test_case(801, 10, 800, 800, 2 ; "one_pixel_over")]
    #[test_case(1601, 1, 800, 800, 2 ; "integer_division_rounds_down")]
    #[test_case(1602, 1, 800, 800, 4 ; "just_over_double")]
    #[test_case(100, 5000, 800, 800, 8 ; "tall_portrait")]
    fn test_sample_factor(w: u32, h: u32, bw: u32, bh: u32, expected: u32) {
        assert_eq!(sample_factor(w, h, Bounds::new(bw, bh)), expected);
    }

    #[test]
    fn test_sample_factor_is_smallest_power_of_two() {
        let bounds = Bounds::new(300, 200);
        for (w, h) in [(4000, 3000), (301, 199), (7, 9000), (1200, 800)] {
            let factor = sample_factor(w, h, bounds);
            assert!(factor.is_power_of_two());
            assert!(bounds.contains(w / factor, h / factor));
            if factor > 1 {
                let half = factor / 2;
                assert!(!bounds.contains(w / half, h / half));
            }
        }
    }

    #[test]
    fn test_sample_factor_terminates_for_huge_images() {
        let factor = sample_factor(u32::MAX, u32::MAX, Bounds::new(1, 1));
        assert_eq!(factor, 1 << 31);
    }

    #[test]
    fn test_decode_sampled_reduces_dimensions() -> PipelineResult<()> {
        let bytes = encode_png(400, 300);
        let (raster, factor) = decode_sampled(&bytes, Bounds::new(100, 100))?;

        assert_eq!(factor, 4);
        assert_eq!((raster.width(), raster.height()), (100, 75));
        Ok(())
    }

    #[test]
    fn test_decode_sampled_keeps_small_images() -> PipelineResult<()> {
        let bytes = encode_png(64, 48);
        let (raster, factor) = decode_sampled(&bytes, Bounds::new(800, 800))?;

        assert_eq!(factor, 1);
        assert_eq!((raster.width(), raster.height()), (64, 48));
        Ok(())
    }

    #[test]
    fn test_jpeg_is_decoded_at_dct_scale() -> PipelineResult<()> {
        let bytes = encode_plain_jpeg(1600, 1200);
        let raster = decode_jpeg_scaled(&bytes, 200, 150)?;

        let raster = raster.ok_or_else(|| PipelineError::decode("expected a scaled decode"))?;
        assert_eq!((raster.width(), raster.height()), (200, 150));
        Ok(())
    }

    #[test_case(2, (400, 300) ; "half")]
    #[test_case(4, (200, 150) ; "quarter")]
    #[test_case(8, (100, 75) ; "eighth")]
    #[test_case(16, (100, 75) ; "beyond_eighth_stops_at_eighth")]
    fn test_dct_scale_never_undershoots(factor: u32, expected: (u32, u32)) -> PipelineResult<()> {
        let bytes = encode_plain_jpeg(800, 600);
        let raster = decode_jpeg_scaled(&bytes, 800 / factor, 600 / factor)?
            .ok_or_else(|| PipelineError::decode("expected a scaled decode"))?;

        assert_eq!((raster.width(), raster.height()), expected);
        Ok(())
    }

    #[test]
    fn test_decode_sampled_jpeg_reaches_target() -> PipelineResult<()> {
        let bytes = encode_plain_jpeg(1000, 700);
        let (raster, factor) = decode_sampled(&bytes, Bounds::new(100, 100))?;

        assert_eq!(factor, 16);
        assert_eq!((raster.width(), raster.height()), (62, 43));
        Ok(())
    }

    #[test]
    fn test_limits_follow_source_dimensions() {
        let default_cap = Limits::default().max_alloc.unwrap_or(0);
        let limits = decode_limits(12_000, 12_000);

        let rgba_frame = 12_000u64 * 12_000 * 4;
        assert!(rgba_frame > default_cap);
        assert!(limits.max_alloc.is_some_and(|cap| cap >= rgba_frame));
        assert_eq!(limits.max_image_width, Some(12_000));
        assert_eq!(decode_limits(10, 10).max_alloc, Some(default_cap));
    }

    #[test]
    #[ignore = "allocates a 576 MB frame"]
    fn test_huge_png_decodes_to_bounds() -> PipelineResult<()> {
        let img = image::RgbaImage::new(12_000, 12_000);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png)
            .map_err(|e| PipelineError::encode(e.to_string()))?;

        let (raster, factor) = decode_sampled(bytes.get_ref(), Bounds::new(800, 800))?;
        assert_eq!(factor, 16);
        assert_eq!((raster.width(), raster.height()), (750, 750));
        Ok(())
    }

    #[test]
    fn test_read_dimensions() -> PipelineResult<()> {
        assert_eq!(read_dimensions(&encode_png(12, 34))?, (12, 34));
        Ok(())
    }

    #[test]
    fn test_garbage_is_decode_failure() {
        let result = decode_sampled(b"definitely not an image", Bounds::default());
        assert!(matches!(result, Err(PipelineError::DecodeFailure { .. })));
    }
}
