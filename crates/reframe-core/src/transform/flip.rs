//! Horizontal mirroring.

use crate::decode::DecodedImage;

/// Mirror `image` left to right.
pub fn flip_horizontal(image: &DecodedImage) -> DecodedImage {
    let row_bytes = image.width as usize * 3;
    let mut pixels = Vec::with_capacity(image.pixels.len());

    for row in image.pixels.chunks_exact(row_bytes.max(1)) {
        for pixel in row.chunks_exact(3).rev() {
            pixels.extend_from_slice(pixel);
        }
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}
