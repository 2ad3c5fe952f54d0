//! Clockwise image rotation by arbitrary angles.
//!
//! Any angle is split into a quarter turn plus a residual in `(-45, 45]`.
//! The quarter turn is an exact pixel permutation; only the residual is
//! resampled. The residual canvas is sized with
//! [`straightened_dimensions`], so a rotated image has exactly the
//! effective dimensions the crop math was done in.
//!
//! # Algorithm
//!
//! The residual uses inverse mapping: for each output pixel centre we find
//! the source position and interpolate. For a clockwise angle θ in y-down
//! coordinates:
//! ```text
//! src_x =  dx * cos θ + dy * sin θ + src_cx
//! src_y = -dx * sin θ + dy * cos θ + src_cy
//! ```
//! Output pixels that map outside the source are filled with black.

use crate::decode::{DecodedImage, FilterType};
use crate::geometry::{straightened_dimensions, QuarterTurn};

const FILL: [u8; 3] = [0, 0, 0];

/// Split `degrees` into a quarter turn and a residual angle in `(-45, 45]`.
///
/// # Example
///
/// ```
/// use reframe_core::geometry::QuarterTurn;
/// use reframe_core::transform::split_rotation;
///
/// assert_eq!(split_rotation(90.0), (QuarterTurn::Deg90, 0.0));
/// assert_eq!(split_rotation(100.0), (QuarterTurn::Deg90, 10.0));
/// assert_eq!(split_rotation(-10.0), (QuarterTurn::Deg0, -10.0));
/// ```
pub fn split_rotation(degrees: f64) -> (QuarterTurn, f64) {
    if !degrees.is_finite() {
        return (QuarterTurn::Deg0, 0.0);
    }
    let turns = ((degrees - 45.0) / 90.0).ceil();
    let residual = degrees - turns * 90.0;
    let quarter = match (turns as i64).rem_euclid(4) {
        1 => QuarterTurn::Deg90,
        2 => QuarterTurn::Deg180,
        3 => QuarterTurn::Deg270,
        _ => QuarterTurn::Deg0,
    };
    (quarter, residual)
}

/// Rotate `image` clockwise by `degrees`.
///
/// Exact multiples of 90 are lossless. Other angles expand the canvas to
/// the rotated bounding box.
pub fn rotate_clockwise(image: &DecodedImage, degrees: f64, filter: FilterType) -> DecodedImage {
    let (quarter, residual) = split_rotation(degrees);
    let turned = rotate_quarter(image, quarter);
    if residual == 0.0 || turned.is_empty() {
        return turned;
    }
    rotate_residual(&turned, residual, filter)
}

/// Lossless quarter-turn rotation.
pub fn rotate_quarter(image: &DecodedImage, quarter: QuarterTurn) -> DecodedImage {
    let (w, h) = (image.width as usize, image.height as usize);
    if quarter == QuarterTurn::Deg0 || image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = if quarter.swaps_dimensions() { (h, w) } else { (w, h) };
    let mut output = vec![0u8; dst_w * dst_h * 3];

    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = match quarter {
                QuarterTurn::Deg90 => (h - 1 - y, x),
                QuarterTurn::Deg180 => (w - 1 - x, h - 1 - y),
                QuarterTurn::Deg270 => (y, w - 1 - x),
                QuarterTurn::Deg0 => (x, y),
            };
            let src = (y * w + x) * 3;
            let dst = (dy * dst_w + dx) * 3;
            output[dst..dst + 3].copy_from_slice(&image.pixels[src..src + 3]);
        }
    }

    DecodedImage {
        width: dst_w as u32,
        height: dst_h as u32,
        pixels: output,
    }
}

fn rotate_residual(image: &DecodedImage, degrees: f64, filter: FilterType) -> DecodedImage {
    let (dst_w, dst_h) = straightened_dimensions(image.width, image.height, degrees);

    let (sin, cos) = degrees.to_radians().sin_cos();
    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * 3);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            // Back to pixel-index coordinates in the source
            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match filter {
                FilterType::Nearest => sample_nearest(image, src_x, src_y),
                FilterType::Bilinear => sample_bilinear(image, src_x, src_y),
                FilterType::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };
            output.extend_from_slice(&pixel);
        }
    }

    DecodedImage {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

#[inline]
fn outside(image: &DecodedImage, x: f64, y: f64) -> bool {
    x < -0.5 || y < -0.5 || x >= image.width as f64 - 0.5 || y >= image.height as f64 - 0.5
}

#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    if outside(image, x, y) {
        return FILL;
    }
    let px = (x.round().max(0.0) as u32).min(image.width - 1);
    let py = (y.round().max(0.0) as u32).min(image.height - 1);
    image.pixel(px, py)
}

/// Bilinear interpolation over the 4 nearest pixels, clamped at the edges.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    if outside(image, x, y) {
        return FILL;
    }
    let max_x = image.width as usize - 1;
    let max_y = image.height as usize - 1;

    let xc = x.max(0.0).min(max_x as f64);
    let yc = y.max(0.0).min(max_y as f64);
    let x0 = xc.floor() as usize;
    let y0 = yc.floor() as usize;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = xc - x0 as f64;
    let fy = yc - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Lanczos3 over a 6x6 neighbourhood; falls back to bilinear near edges.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);
    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = get_pixel_f64(image, px as usize, py as usize);
            for i in 0..3 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 3];
    if weight_sum > 0.0 {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
    result
}

/// `L(x) = sinc(x) * sinc(x / a)` for `|x| < a`, zero outside.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::effective_dimensions;
    use proptest::prelude::*;

    proptest! {
        /// Property: the residual always lies in [-45, 45] and the pieces sum
        /// back to the input angle.
        #[test]
        fn prop_split_rotation_recombines(degrees in -720.0f64..=720.0) {
            let (quarter, residual) = split_rotation(degrees);
            prop_assert!((-45.0..=45.0).contains(&residual));

            let total = quarter.degrees() as f64 + residual;
            let diff = (total - degrees).rem_euclid(360.0);
            prop_assert!(diff < 1e-9 || (360.0 - diff) < 1e-9);
        }

        /// Property: the rotated canvas equals the effective dimensions for
        /// the same quarter turn and residual.
        #[test]
        fn prop_canvas_is_effective_size(
            width in 1u32..=40,
            height in 1u32..=40,
            degrees in -360.0f64..=360.0,
        ) {
            let img = DecodedImage::filled(width, height, [9, 9, 9]);
            let out = rotate_clockwise(&img, degrees, FilterType::Nearest);
            let (quarter, residual) = split_rotation(degrees);

            prop_assert_eq!(
                (out.width, out.height),
                effective_dimensions(width, height, quarter, residual)
            );
            prop_assert_eq!(out.pixels.len(), (out.width * out.height * 3) as usize);
        }
    }
}
