//! Pure geometry bindings for host layout code.
//!
//! Sizes go out as flat typed arrays (`[width, height]`, `[x, y, w, h]`) so
//! the per-frame layout path allocates no JS objects.

use reframe_core::geometry::{
    self as geom, AspectPreset, CropParams, Dimensions, FrameSize, QuarterTurn, ViewTransform,
};
use wasm_bindgen::prelude::*;

use crate::types::{from_js, to_js_error};

/// Cover-fit scale for an effective image inside a crop frame.
#[wasm_bindgen]
pub fn min_scale(eff_width: u32, eff_height: u32, frame_width: f64, frame_height: f64) -> f64 {
    geom::min_scale(
        Dimensions {
            width: eff_width,
            height: eff_height,
        },
        FrameSize {
            width: frame_width,
            height: frame_height,
        },
    )
}

/// Effective `[width, height]` after a quarter turn and straighten angle.
///
/// # Arguments
/// * `rotate90` - One of 0, 90, 180, 270
/// * `straighten` - Residual angle in degrees
#[wasm_bindgen]
pub fn effective_size(
    width: u32,
    height: u32,
    rotate90: u16,
    straighten: f64,
) -> Result<Vec<u32>, JsValue> {
    let rotation = QuarterTurn::try_from(rotate90).map_err(to_js_error)?;
    let (w, h) = geom::effective_dimensions(width, height, rotation, straighten);
    Ok(vec![w, h])
}

/// Pixel crop `[x, y, width, height]` for a view over the effective image.
#[wasm_bindgen]
pub fn crop_rect(
    eff_width: u32,
    eff_height: u32,
    frame_width: f64,
    frame_height: f64,
    scale: f64,
    tx: f64,
    ty: f64,
) -> Vec<u32> {
    let rect = geom::crop_rect_pixels(&CropParams {
        effective: Dimensions {
            width: eff_width,
            height: eff_height,
        },
        frame: FrameSize {
            width: frame_width,
            height: frame_height,
        },
        view: ViewTransform::new(scale, tx, ty),
    });
    vec![rect.origin_x, rect.origin_y, rect.width, rect.height]
}

/// Crop frame `[width, height]` for an aspect preset such as `"4:5"`,
/// fitted inside the container.
#[wasm_bindgen]
pub fn frame_for_preset(
    container_width: f64,
    container_height: f64,
    preset: JsValue,
    eff_width: u32,
    eff_height: u32,
) -> Result<Vec<f64>, JsValue> {
    let preset: AspectPreset = from_js(preset, "aspect preset")?;
    let frame = geom::frame_for_preset(
        FrameSize {
            width: container_width,
            height: container_height,
        },
        preset,
        Dimensions {
            width: eff_width,
            height: eff_height,
        },
    );
    Ok(vec![frame.width, frame.height])
}
