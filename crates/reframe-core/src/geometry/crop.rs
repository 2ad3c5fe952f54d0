//! Mapping between the on-screen crop frame and effective-pixel space.
//!
//! # Coordinate System
//!
//! - The crop frame is always centred on screen
//! - The image is drawn at `effW * scale x effH * scale`, its centre offset
//!   from the frame centre by `(tx, ty)`
//! - Positive `tx` moves the image right, which moves the visible window left
//!   in image coordinates
//! - Crop rectangles are integer pixels with the origin at the top-left of
//!   the effective (rotated and straightened) image

use serde::{Deserialize, Serialize};

use super::{CropRect, Dimensions, FrameSize, ViewTransform};

/// Everything `crop_rect_pixels` needs to invert the on-screen mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropParams {
    /// Effective image dimensions.
    pub effective: Dimensions,
    /// Crop frame size in display points.
    pub frame: FrameSize,
    /// View transform at commit time.
    pub view: ViewTransform,
}

/// Smallest scale at which the image still covers the whole frame.
///
/// This is the cover-fit scale: `max(frameW / effW, frameH / effH)`.
///
/// # Example
///
/// ```
/// use reframe_core::geometry::{min_scale, Dimensions, FrameSize};
///
/// let effective = Dimensions { width: 1000, height: 1000 };
/// let frame = FrameSize { width: 400.0, height: 500.0 };
/// assert_eq!(min_scale(effective, frame), 0.5);
/// ```
#[inline]
pub fn min_scale(effective: Dimensions, frame: FrameSize) -> f64 {
    let sx = frame.width / effective.width.max(1) as f64;
    let sy = frame.height / effective.height.max(1) as f64;
    sx.max(sy)
}

/// Compute the pixel rectangle visible through the crop frame.
///
/// The visible window spans `frameW / scale x frameH / scale` effective
/// pixels, centred at `(effW / 2 - tx / scale, effH / 2 - ty / scale)`.
///
/// # Behavior
///
/// - The rectangle is clamped to the image: `0 <= originX`,
///   `originX + width <= effW`, same for Y
/// - Width and height are at least 1 pixel, even at degenerate scales
/// - Never panics, whatever the numbers
pub fn crop_rect_pixels(params: &CropParams) -> CropRect {
    let eff_w = params.effective.width.max(1) as f64;
    let eff_h = params.effective.height.max(1) as f64;
    let ViewTransform { scale, tx, ty } = params.view;

    let visible_w = params.frame.width / scale;
    let visible_h = params.frame.height / scale;

    let center_x = eff_w / 2.0 - tx / scale;
    let center_y = eff_h / 2.0 - ty / scale;

    let width = visible_w.round().max(1.0).min(eff_w);
    let height = visible_h.round().max(1.0).min(eff_h);

    // max/min rather than clamp: NaN must not panic
    let origin_x = (center_x - width / 2.0).round().max(0.0).min(eff_w - width);
    let origin_y = (center_y - height / 2.0).round().max(0.0).min(eff_h - height);

    CropRect {
        origin_x: origin_x as u32,
        origin_y: origin_y as u32,
        width: width as u32,
        height: height as u32,
    }
}

/// Largest pan offset along one axis that keeps the image covering the frame.
#[inline]
pub fn max_pan(effective_edge: u32, frame_edge: f64, scale: f64) -> f64 {
    ((effective_edge as f64 * scale - frame_edge) / 2.0).max(0.0)
}

/// Bound a pan offset so the image keeps covering the frame at `scale`.
///
/// # Example
///
/// ```
/// use reframe_core::geometry::{clamp_pan, Dimensions, FrameSize};
///
/// let effective = Dimensions { width: 2000, height: 2000 };
/// let frame = FrameSize { width: 400.0, height: 500.0 };
/// assert_eq!(clamp_pan(1000.0, -900.0, effective, frame, 1.0), (800.0, -750.0));
/// ```
pub fn clamp_pan(
    tx: f64,
    ty: f64,
    effective: Dimensions,
    frame: FrameSize,
    scale: f64,
) -> (f64, f64) {
    let max_tx = max_pan(effective.width, frame.width, scale);
    let max_ty = max_pan(effective.height, frame.height, scale);
    (tx.clamp(-max_tx, max_tx), ty.clamp(-max_ty, max_ty))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
