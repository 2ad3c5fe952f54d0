//! Synchronous execution of an export plan on decoded pixels.
//!
//! Same steps, same order as [`ExportPipeline`](crate::export::ExportPipeline),
//! for hosts that already hold the decoded source and have no async runtime
//! (the WASM worker).

use crate::decode::{DecodeError, DecodedImage, FilterType};
use crate::export::{ExportPlan, ExportStep};
use crate::transform::{apply_crop, flip_horizontal, resize_to_target, rotate_clockwise};

/// Apply every step of `plan` to `image`, stopping before encode.
///
/// # Arguments
/// * `image` - Decoded source, already orientation-corrected
/// * `plan` - Plan built for a source of the same size
/// * `filter` - Resampling filter for straighten and resize
///
/// # Returns
/// The pixels to hand to the encoder, or an error if the image does not match
/// the plan's source size.
pub fn render_plan(
    image: DecodedImage,
    plan: &ExportPlan,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let expected = plan.source_size();
    if (image.width, image.height) != (expected.width, expected.height) {
        return Err(DecodeError::CorruptedFile(format!(
            "source is {}x{}, plan expects {}x{}",
            image.width, image.height, expected.width, expected.height
        )));
    }

    let mut image = image;
    for step in plan.steps() {
        image = match *step {
            ExportStep::Rotate { degrees } => rotate_clockwise(&image, degrees, filter),
            ExportStep::FlipHorizontal => flip_horizontal(&image),
            ExportStep::Crop { rect } => apply_crop(&image, &rect),
            ExportStep::Resize { target } => resize_to_target(&image, target, filter)?,
        };
    }
    Ok(image)
}
