//! Pure geometry: transform parameters in, pixel rectangles out.
//!
//! Nothing in this module holds state or touches pixels. Every function is a
//! plain computation on numbers so it can be tested in isolation and called
//! from any context, including the gesture task.
//!
//! # Spaces
//!
//! - **Source space**: pixels of the original asset
//! - **Effective space**: source after the quarter turn and straighten angle
//!   are baked in; crop rectangles live here
//! - **Display space**: points on screen, where the crop frame and the view
//!   transform live
//!
//! Inputs are assumed valid. Use [`Dimensions::new`], [`FrameSize::new`] and
//! [`ViewTransform::validated`] at the boundary to reject malformed values.

mod bounds;
mod crop;
mod frame;
mod types;

pub use bounds::{effective_dimensions, rotated_dimensions, straightened_dimensions};
pub use crop::{clamp_pan, crop_rect_pixels, max_pan, min_scale, CropParams};
pub use frame::{fit_frame, frame_for_preset, AspectPreset};
pub use types::{CropRect, Dimensions, FrameSize, QuarterTurn, ResizeTarget, ViewTransform};
