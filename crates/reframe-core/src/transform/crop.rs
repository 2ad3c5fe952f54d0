//! Pixel-rectangle cropping.
//!
//! Rectangles come from [`crate::geometry::crop_rect_pixels`] and are already
//! clamped to the effective image. The crop still clamps against the actual
//! buffer so a one-pixel disagreement between planned and produced
//! dimensions never reads out of bounds.

use crate::decode::DecodedImage;
use crate::geometry::CropRect;

/// Copy the pixels inside `rect` into a new image.
///
/// # Behavior
///
/// - The rectangle is clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
/// - A rectangle covering the whole image returns a copy
///
/// # Example
///
/// ```
/// use reframe_core::decode::DecodedImage;
/// use reframe_core::geometry::CropRect;
/// use reframe_core::transform::apply_crop;
///
/// let image = DecodedImage::filled(100, 100, [128, 128, 128]);
/// let rect = CropRect { origin_x: 25, origin_y: 25, width: 50, height: 50 };
/// let cropped = apply_crop(&image, &rect);
/// assert_eq!((cropped.width, cropped.height), (50, 50));
/// ```
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }

    let left = rect.origin_x.min(image.width.saturating_sub(1));
    let top = rect.origin_y.min(image.height.saturating_sub(1));
    let out_width = rect.width.min(image.width - left).max(1);
    let out_height = rect.height.min(image.height - top).max(1);

    if left == 0 && top == 0 && out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let src_stride = image.width as usize * 3;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
