//! Plain value types used by the geometry functions.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions, rejecting zero-sized images.
    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::NonPositiveDimension {
                what: "image size",
                width: width as f64,
                height: height as f64,
            });
        }
        Ok(Self { width, height })
    }

    /// Landscape or square images are resized by width, portrait ones by height.
    #[inline]
    pub fn is_landscape_or_square(self) -> bool {
        self.width >= self.height
    }

    #[inline]
    pub fn longest_edge(self) -> u32 {
        self.width.max(self.height)
    }

    /// Width over height.
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// On-screen size of the crop frame, in display points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    /// Create a frame size, rejecting non-finite or non-positive values.
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        check_finite("frame width", width)?;
        check_finite("frame height", height)?;
        if width <= 0.0 || height <= 0.0 {
            return Err(ValidationError::NonPositiveDimension {
                what: "crop frame",
                width,
                height,
            });
        }
        Ok(Self { width, height })
    }
}

/// Interactive transform of the displayed image relative to the crop frame.
///
/// `scale` is display points per effective pixel. `tx`/`ty` offset the image
/// centre from the frame centre; positive `tx` moves the image right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn new(scale: f64, tx: f64, ty: f64) -> Self {
        Self { scale, tx, ty }
    }

    /// Check that every component is finite and the scale is positive.
    pub fn validated(self) -> Result<Self, ValidationError> {
        check_finite("scale", self.scale)?;
        check_finite("tx", self.tx)?;
        check_finite("ty", self.ty)?;
        if self.scale <= 0.0 {
            return Err(ValidationError::NonPositive {
                what: "scale",
                value: self.scale,
            });
        }
        Ok(self)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRect {
    pub origin_x: u32,
    pub origin_y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// True when the rectangle lies entirely inside `bounds`.
    pub fn fits_within(&self, bounds: Dimensions) -> bool {
        self.origin_x as u64 + self.width as u64 <= bounds.width as u64
            && self.origin_y as u64 + self.height as u64 <= bounds.height as u64
    }
}

/// Which edge an aspect-preserving resize is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeTarget {
    Width(u32),
    Height(u32),
}

/// Clockwise quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum QuarterTurn {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl QuarterTurn {
    #[inline]
    pub fn degrees(self) -> u16 {
        match self {
            QuarterTurn::Deg0 => 0,
            QuarterTurn::Deg90 => 90,
            QuarterTurn::Deg180 => 180,
            QuarterTurn::Deg270 => 270,
        }
    }

    /// The next quarter turn clockwise, wrapping 270 back to 0.
    #[inline]
    pub fn clockwise(self) -> Self {
        match self {
            QuarterTurn::Deg0 => QuarterTurn::Deg90,
            QuarterTurn::Deg90 => QuarterTurn::Deg180,
            QuarterTurn::Deg180 => QuarterTurn::Deg270,
            QuarterTurn::Deg270 => QuarterTurn::Deg0,
        }
    }

    /// Returns true for 90 and 270, which swap width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurn::Deg90 | QuarterTurn::Deg270)
    }
}

impl TryFrom<u16> for QuarterTurn {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QuarterTurn::Deg0),
            90 => Ok(QuarterTurn::Deg90),
            180 => Ok(QuarterTurn::Deg180),
            270 => Ok(QuarterTurn::Deg270),
            other => Err(format!("rotation must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

impl From<QuarterTurn> for u16 {
    fn from(turn: QuarterTurn) -> Self {
        turn.degrees()
    }
}

fn check_finite(what: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { what, value })
    }
}
