//! Aspect-preserving resize for the export step.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use crate::decode::{DecodeError, DecodedImage, FilterType};
use crate::geometry::ResizeTarget;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target size and
/// `DecodeError::BufferMismatch` if the source buffer is malformed.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(DecodeError::BufferMismatch {
        expected: image.width as usize * image.height as usize * 3,
        actual: image.pixels.len(),
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize so the pinned edge matches `target`, scaling the other edge by
/// the same factor.
pub fn resize_to_target(
    image: &DecodedImage,
    target: ResizeTarget,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = target_dimensions(image.width, image.height, target);
    resize(image, width, height, filter)
}

/// Output dimensions for an aspect-preserving resize. Never below 1x1.
pub fn target_dimensions(width: u32, height: u32, target: ResizeTarget) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    match target {
        ResizeTarget::Width(new_width) => {
            let new_height = (new_width as f64 / ratio).round() as u32;
            (new_width.max(1), new_height.max(1))
        }
        ResizeTarget::Height(new_height) => {
            let new_width = (new_height as f64 * ratio).round() as u32;
            (new_width.max(1), new_height.max(1))
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
