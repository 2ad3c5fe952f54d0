//! The transform primitives an export is built from.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::edit::OutputFormat;
use crate::geometry::{CropRect, Dimensions, ResizeTarget};

/// Final asset handed to the uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// A host image-transform engine.
///
/// Each primitive consumes the previous image and yields the next, so a
/// failed step leaves nothing behind. Implementations decide where images
/// live (in memory, temp files, a native bridge); the pipeline only orders
/// the calls.
pub trait TransformEngine: Send + Sync {
    type Image: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open the source asset.
    fn load(&self, uri: &str) -> impl Future<Output = Result<Self::Image, Self::Error>> + Send;

    /// Pixel size of an image the engine produced.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Rotate clockwise by `degrees`, expanding the canvas to the rotated
    /// bounding box.
    fn rotate(
        &self,
        image: Self::Image,
        degrees: f64,
    ) -> impl Future<Output = Result<Self::Image, Self::Error>> + Send;

    fn flip_horizontal(
        &self,
        image: Self::Image,
    ) -> impl Future<Output = Result<Self::Image, Self::Error>> + Send;

    fn crop(
        &self,
        image: Self::Image,
        rect: CropRect,
    ) -> impl Future<Output = Result<Self::Image, Self::Error>> + Send;

    /// Aspect-preserving resize pinned to one edge.
    fn resize(
        &self,
        image: Self::Image,
        target: ResizeTarget,
    ) -> impl Future<Output = Result<Self::Image, Self::Error>> + Send;

    /// Encode and store the image. `quality` is in `[0, 1]`.
    fn encode(
        &self,
        image: Self::Image,
        quality: f64,
        format: OutputFormat,
    ) -> impl Future<Output = Result<ExportResult, Self::Error>> + Send;
}
