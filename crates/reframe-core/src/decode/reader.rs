//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};
use crate::geometry::QuarterTurn;

/// Decode JPEG, PNG or WebP bytes, applying EXIF orientation correction.
///
/// The session's source size refers to the image as the user sees it, so
/// orientation is baked in before any edit geometry applies.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Decode bytes as stored, ignoring any EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = read_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// EXIF orientation of the image, upright when absent or unreadable.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::UPRIGHT;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    let turned = match orientation.turn {
        QuarterTurn::Deg0 => img,
        QuarterTurn::Deg90 => img.rotate90(),
        QuarterTurn::Deg180 => img.rotate180(),
        QuarterTurn::Deg270 => img.rotate270(),
    };
    if orientation.mirror {
        turned.fliph()
    } else {
        turned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::OutputFormat;
    use crate::encode::encode;

    fn two_by_one() -> DecodedImage {
        // Red on the left, green on the right
        DecodedImage::new(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap()
    }

    /// Splice an APP1 segment carrying only an orientation tag into a JPEG.
    fn with_orientation(jpeg: &[u8], orientation: u8) -> Vec<u8> {
        let mut tiff = vec![b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        tiff.extend_from_slice(&[0x01, 0x00]);
        tiff.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
        tiff.extend_from_slice(&[orientation, 0x00, 0x00, 0x00]);
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);
        let len = (payload.len() + 2) as u16;

        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_png_is_exact() {
        let png = encode(&two_by_one(), 1.0, OutputFormat::Png).unwrap();
        let img = decode_image(&png).unwrap();

        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixel(0, 0), [255, 0, 0]);
        assert_eq!(img.pixel(1, 0), [0, 255, 0]);
    }

    #[test]
    fn test_decode_jpeg() {
        let jpeg = encode(&DecodedImage::filled(8, 4, [128, 128, 128]), 0.9, OutputFormat::Jpeg)
            .unwrap();
        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width, img.height), (8, 4));
        assert_eq!(img.pixels.len(), 8 * 4 * 3);
    }

    #[test]
    fn test_exif_orientation_applied() {
        let jpeg = encode(&DecodedImage::filled(8, 4, [200, 50, 50]), 0.9, OutputFormat::Jpeg)
            .unwrap();
        let rotated = with_orientation(&jpeg, 6);

        assert_eq!(get_orientation(&rotated), Orientation::from_exif(6));

        let img = decode_image(&rotated).unwrap();
        assert_eq!((img.width, img.height), (4, 8));

        let raw = decode_image_no_orientation(&rotated).unwrap();
        assert_eq!((raw.width, raw.height), (8, 4));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated() {
        let png = encode(&two_by_one(), 1.0, OutputFormat::Png).unwrap();
        assert!(decode_image(&png[..20]).is_err());
    }

    #[test]
    fn test_orientation_without_exif() {
        let png = encode(&two_by_one(), 1.0, OutputFormat::Png).unwrap();
        assert_eq!(get_orientation(&png), Orientation::UPRIGHT);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::UPRIGHT);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let img = DynamicImage::ImageRgb8(two_by_one().into_rgb_image().unwrap());
        let out = apply_orientation(img, Orientation::from_exif(3)).into_rgb8();

        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_transpose() {
        // Tag 5: quarter turn then mirror swaps the axes
        let img = DynamicImage::ImageRgb8(two_by_one().into_rgb_image().unwrap());
        let out = apply_orientation(img, Orientation::from_exif(5)).into_rgb8();

        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(out.get_pixel(0, 1).0, [0, 255, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let img = DynamicImage::ImageRgb8(two_by_one().into_rgb_image().unwrap());
        let out = apply_orientation(img, Orientation::from_exif(2)).into_rgb8();

        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(out.dimensions(), (2, 1));
    }
}
