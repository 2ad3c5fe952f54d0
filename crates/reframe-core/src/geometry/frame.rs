//! Aspect presets and the crop frame they produce inside the host layout.

use serde::{Deserialize, Serialize};

use super::{Dimensions, FrameSize};

/// Named target ratio for the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectPreset {
    /// Ratio of the effective image itself.
    #[default]
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait4x5,
    #[serde(rename = "16:9")]
    Wide16x9,
    #[serde(rename = "9:16")]
    Tall9x16,
    /// No constraint; the frame fills the container.
    #[serde(rename = "free")]
    Free,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 6] = [
        AspectPreset::Original,
        AspectPreset::Square,
        AspectPreset::Portrait4x5,
        AspectPreset::Wide16x9,
        AspectPreset::Tall9x16,
        AspectPreset::Free,
    ];

    /// Width over height for this preset, or `None` for `Free`.
    ///
    /// `Original` follows the effective image, so it flips with quarter turns.
    pub fn ratio(self, effective: Dimensions) -> Option<f64> {
        match self {
            AspectPreset::Original => Some(effective.aspect_ratio()),
            AspectPreset::Square => Some(1.0),
            AspectPreset::Portrait4x5 => Some(4.0 / 5.0),
            AspectPreset::Wide16x9 => Some(16.0 / 9.0),
            AspectPreset::Tall9x16 => Some(9.0 / 16.0),
            AspectPreset::Free => None,
        }
    }

    /// Label shown on the toolbar chip.
    pub fn label(self) -> &'static str {
        match self {
            AspectPreset::Original => "Original",
            AspectPreset::Square => "1:1",
            AspectPreset::Portrait4x5 => "4:5",
            AspectPreset::Wide16x9 => "16:9",
            AspectPreset::Tall9x16 => "9:16",
            AspectPreset::Free => "Free",
        }
    }
}

/// Largest frame with the given ratio that fits inside `container`, or the
/// container itself when there is no ratio.
pub fn fit_frame(container: FrameSize, ratio: Option<f64>) -> FrameSize {
    let Some(ratio) = ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return container;
    };

    let container_ratio = container.width / container.height;
    if ratio >= container_ratio {
        // Wider than the container: width is the binding edge
        FrameSize {
            width: container.width,
            height: container.width / ratio,
        }
    } else {
        FrameSize {
            width: container.height * ratio,
            height: container.height,
        }
    }
}

/// Convenience for the host layout: the crop frame for `preset`.
pub fn frame_for_preset(
    container: FrameSize,
    preset: AspectPreset,
    effective: Dimensions,
) -> FrameSize {
    fit_frame(container, preset.ratio(effective))
}
