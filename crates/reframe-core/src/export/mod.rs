//! The one destructive operation: committing an edit to pixels.
//!
//! Export is split in two:
//! - [`ExportPlan::build`] is pure and turns the final edit state into an
//!   ordered list of primitive calls
//! - [`ExportPipeline`] runs a plan against a [`TransformEngine`], one export
//!   at a time per session
//!
//! The plan is serializable, so a host that owns its own image engine can
//! run the steps itself.

mod engine;
mod pipeline;
mod plan;

pub use engine::{ExportResult, TransformEngine};
pub use pipeline::ExportPipeline;
pub use plan::{EncodeSettings, ExportPlan, ExportRequest, ExportStep};
