//! Reframe Core - non-destructive crop and straighten editor
//!
//! While editing, nothing touches pixels: the session holds a small
//! [`Snapshot`] of view, aspect, rotation, flip and output options, and the
//! crop surface turns gestures into view updates. Only export decodes the
//! source and runs rotate, flip, crop, resize and encode, once.
//!
//! - [`geometry`]: pure math for fitting, clamping and crop rectangles
//! - [`edit`]: edit actions, snapshot reducer and bounded undo/redo
//! - [`surface`]: pan, pinch and double-tap with rubber-band settling
//! - [`export`]: export plan and the async pipeline over a [`TransformEngine`]
//! - [`engine`]: the `image`-crate engine used by native hosts and WASM
//! - [`decode`], [`transform`], [`encode`], [`render`]: the pixel primitives

pub mod config;
pub mod decode;
pub mod edit;
pub mod encode;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod render;
pub mod surface;
pub mod transform;

pub use config::{EditorConfig, SurfaceLimits};
pub use decode::{decode_image, DecodeError, DecodedImage, FilterType};
pub use edit::{EditAction, EditSession, OutputFormat, OutputOptions, Snapshot};
pub use engine::{EngineError, PixelEngine};
pub use error::{ExportError, StepKind, ValidationError};
pub use export::{ExportPipeline, ExportPlan, ExportRequest, ExportResult, TransformEngine};
pub use geometry::{
    AspectPreset, CropRect, Dimensions, FrameSize, QuarterTurn, ResizeTarget, ViewTransform,
};
pub use render::render_plan;
pub use surface::{CropSurface, GestureActor, GestureEvent, SurfaceEvent};
