//! Output encoding for the final export step.
//!
//! - JPEG with quality mapped from `[0, 1]` onto the encoder's `1..=100`
//! - PNG
//! - WebP (lossless)

mod jpeg;
mod lossless;

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::edit::OutputFormat;

pub use jpeg::encode_jpeg;
pub use lossless::{encode_png, encode_webp};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode `image` in `format`. `quality` only affects JPEG.
pub fn encode(
    image: &DecodedImage,
    quality: f64,
    format: OutputFormat,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            jpeg_quality(quality),
        ),
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
        OutputFormat::Webp => encode_webp(&image.pixels, image.width, image.height),
    }
}

/// Map a `[0, 1]` quality onto the JPEG encoder's `1..=100` scale.
pub fn jpeg_quality(quality: f64) -> u8 {
    if !quality.is_finite() {
        return 90;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(jpeg_quality(0.9), 90);
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.333), 33);
        assert_eq!(jpeg_quality(f64::NAN), 90);
    }

    #[test]
    fn test_encode_dispatches_on_format() {
        let image = DecodedImage::filled(4, 4, [10, 20, 30]);

        let jpeg = encode(&image, 0.8, OutputFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode(&image, 0.8, OutputFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let webp = encode(&image, 0.8, OutputFormat::Webp).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (3) must be non-zero"
        );
    }
}
