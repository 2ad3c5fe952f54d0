//! Error types shared across the editing core.
//!
//! Only two things can actually fail here: a collaborator handing us
//! malformed dimensions or config values ([`ValidationError`]) and the export
//! pipeline, whose primitive calls can fail for reasons outside our control
//! ([`ExportError`]).
//! Out-of-range straighten angles, pinch/pan overshoot and undo on an empty
//! stack are clamped or ignored, never reported.

use std::fmt;

use thiserror::Error;

use crate::geometry::Dimensions;

/// Malformed input supplied at a boundary, rejected before any geometry runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Width or height is zero, negative or otherwise unusable.
    #[error("{what} must have positive dimensions, got {width}x{height}")]
    NonPositiveDimension {
        what: &'static str,
        width: f64,
        height: f64,
    },

    /// A scalar that must be strictly positive is zero or negative.
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    /// A numeric input is NaN or infinite.
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// The primitive operation an export step maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Load,
    Rotate,
    Flip,
    Crop,
    Resize,
    Encode,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Load => "load",
            StepKind::Rotate => "rotate",
            StepKind::Flip => "flip",
            StepKind::Crop => "crop",
            StepKind::Resize => "resize",
            StepKind::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Failure of a commit. No partial asset accompanies any of these.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another export for the same session has not finished yet.
    #[error("An export is already in progress for this session")]
    Busy,

    /// The export request carried malformed dimensions or transforms.
    #[error("Invalid export request: {0}")]
    Invalid(#[from] ValidationError),

    /// The decoded source does not have the size the session was opened with.
    #[error("Source is {actual:?} but the session expects {expected:?}")]
    SourceMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },

    /// A transform primitive failed.
    #[error("{step} failed: {source}")]
    Primitive {
        step: StepKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ExportError {
    pub(crate) fn primitive<E>(step: StepKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ExportError::Primitive {
            step,
            source: Box::new(source),
        }
    }

    /// The step that failed, when the failure came from a primitive.
    pub fn failed_step(&self) -> Option<StepKind> {
        match self {
            ExportError::Primitive { step, .. } => Some(*step),
            _ => None,
        }
    }
}
