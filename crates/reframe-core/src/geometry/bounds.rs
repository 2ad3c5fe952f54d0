//! Image dimensions after rotation is baked in.
//!
//! Quarter turns only ever swap width and height. Straightening rotates by an
//! arbitrary angle, so the image grows to the bounding box of the rotated
//! rectangle:
//!
//! ```text
//! w' = ceil(w * cos θ + h * sin θ)
//! h' = ceil(h * cos θ + w * sin θ)      θ = |degrees| in radians
//! ```
//!
//! The pixel engine sizes its rotation canvas with these same functions, so
//! the crop rectangle computed here is always expressed in the exact pixel
//! space the export pipeline produces.

use super::QuarterTurn;

/// Dimensions after a clockwise quarter-turn rotation.
///
/// # Example
///
/// ```
/// use reframe_core::geometry::{rotated_dimensions, QuarterTurn};
///
/// assert_eq!(rotated_dimensions(1000, 800, QuarterTurn::Deg90), (800, 1000));
/// assert_eq!(rotated_dimensions(1000, 800, QuarterTurn::Deg180), (1000, 800));
/// ```
#[inline]
pub fn rotated_dimensions(width: u32, height: u32, rotation: QuarterTurn) -> (u32, u32) {
    if rotation.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Bounding box of a `width x height` rectangle rotated by `degrees`.
///
/// The sign of the angle does not matter. Zero is an exact identity.
/// Dimensions never drop below 1x1.
pub fn straightened_dimensions(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    if degrees == 0.0 {
        return (width, height);
    }

    let theta = degrees.abs().to_radians();
    let (sin, cos) = theta.sin_cos();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).ceil();
    let new_h = (h * cos + w * sin).ceil();

    // NaN casts to 0, which the max(1) below absorbs
    ((new_w as u32).max(1), (new_h as u32).max(1))
}

/// Dimensions of the source once the quarter turn and straighten angle are
/// both applied. This is the reference frame for cover-fit and crop math.
#[inline]
pub fn effective_dimensions(
    width: u32,
    height: u32,
    rotation: QuarterTurn,
    degrees: f64,
) -> (u32, u32) {
    let (w, h) = rotated_dimensions(width, height, rotation);
    straightened_dimensions(w, h, degrees)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
