//! Pixel-level transform primitives used by the export pipeline.
//!
//! # Transform Order
//!
//! An export applies these in a fixed order:
//! 1. Rotation (quarter turn + straighten, one combined clockwise angle)
//! 2. Horizontal flip
//! 3. Crop (rectangle in post-rotate, post-flip pixel space)
//! 4. Resize
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop rectangles are integer pixels, origin at the top-left corner

mod crop;
mod flip;
mod resize;
mod rotation;

pub use crop::apply_crop;
pub use flip::flip_horizontal;
pub use resize::{resize, resize_to_target, target_dimensions};
pub use rotation::{rotate_clockwise, rotate_quarter, split_rotation};
