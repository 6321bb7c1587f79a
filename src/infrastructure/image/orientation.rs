//! EXIF orientation normalization.
//!
//! The orientation tag is read from the original encoded bytes, never from
//! a downsampled raster, since re-encoding strips metadata.

use std::io::Cursor;

use image::DynamicImage;
use image::metadata::Orientation;
use tracing::{debug, trace};

/// Reads the EXIF orientation of an encoded image.
///
/// Missing, unreadable, or out of range tags yield `NoTransforms`.
#[must_use]
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let exif = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(e) => {
            trace!(error = %e, "No readable EXIF metadata");
            return Orientation::NoTransforms;
        }
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(|value| u8::try_from(value).ok())
        .and_then(Orientation::from_exif)
        .unwrap_or(Orientation::NoTransforms)
}

/// Rotates or mirrors `raster` so it displays upright.
#[must_use]
pub fn normalize(mut raster: DynamicImage, orientation: Orientation) -> DynamicImage {
    if orientation == Orientation::NoTransforms {
        return raster;
    }

    debug!(?orientation, "Applying EXIF orientation");
    raster.apply_orientation(orientation);
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::image::test_support::{encode_jpeg_with_orientation, encode_png};
    use image::{GenericImageView, Rgba, RgbaImage};
    use test_case::test_case;

    fn marked(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    fn red_at(img: &DynamicImage) -> (u32, u32) {
        img.pixels()
            .find(|(_, _, p)| p.0[0] == 255)
            .map(|(x, y, _)| (x, y))
            .unwrap_or((u32::MAX, u32::MAX))
    }

    #[test_case(Orientation::NoTransforms, (4, 2), (0, 0) ; "normal")]
    #[test_case(Orientation::Rotate90, (2, 4), (1, 0) ; "rotate_90")]
    #[test_case(Orientation::Rotate180, (4, 2), (3, 1) ; "rotate_180")]
    #[test_case(Orientation::Rotate270, (2, 4), (0, 3) ; "rotate_270")]
    #[test_case(Orientation::FlipHorizontal, (4, 2), (3, 0) ; "flip_horizontal")]
    #[test_case(Orientation::FlipVertical, (4, 2), (0, 1) ; "flip_vertical")]
    fn test_normalize(orientation: Orientation, dims: (u32, u32), corner: (u32, u32)) {
        let result = normalize(marked(4, 2), orientation);
        assert_eq!(result.dimensions(), dims);
        assert_eq!(red_at(&result), corner);
    }

    #[test]
    fn test_transpose_variants_swap_dimensions() {
        for orientation in [Orientation::Rotate90FlipH, Orientation::Rotate270FlipH] {
            assert_eq!(normalize(marked(4, 2), orientation).dimensions(), (2, 4));
        }
    }

    #[test]
    fn test_png_without_exif_is_normal() {
        assert_eq!(read_orientation(&encode_png(4, 4)), Orientation::NoTransforms);
    }

    #[test]
    fn test_garbage_is_normal() {
        assert_eq!(read_orientation(b"\x00\x01garbage"), Orientation::NoTransforms);
    }

    #[test_case(3, Orientation::Rotate180 ; "exif_3")]
    #[test_case(6, Orientation::Rotate90 ; "exif_6")]
    #[test_case(8, Orientation::Rotate270 ; "exif_8")]
    fn test_reads_jpeg_exif_tag(tag: u16, expected: Orientation) {
        let bytes = encode_jpeg_with_orientation(8, 4, tag);
        assert_eq!(read_orientation(&bytes), expected);
    }

    #[test]
    fn test_out_of_range_tag_is_normal() {
        let bytes = encode_jpeg_with_orientation(8, 4, 42);
        assert_eq!(read_orientation(&bytes), Orientation::NoTransforms);
    }
}
