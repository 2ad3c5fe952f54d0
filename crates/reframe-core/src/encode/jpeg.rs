//! JPEG encoding for export.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Example
///
/// ```
/// use reframe_core::encode::encode_jpeg;
///
/// let pixels = vec![128u8; 100 * 100 * 3];
/// let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_markers() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_higher_quality_keeps_more_detail() {
        // Checkerboard noise compresses worse at high quality
        let (width, height) = (32u32, 32u32);
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|i| {
                let v = if (i % width + i / width) % 2 == 0 { 0 } else { 255 };
                [v, v, v]
            })
            .collect();

        let low = encode_jpeg(&pixels, width, height, 10).unwrap();
        let high = encode_jpeg(&pixels, width, height, 95).unwrap();
        assert!(high.len() > low.len());

        // Out-of-range quality is clamped, not rejected
        assert!(encode_jpeg(&pixels, width, height, 0).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3];
        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
