//! In-process [`TransformEngine`] backed by the `image` crate.
//!
//! Sources are registered as encoded bytes under a URI (or read from disk
//! for `file://` URIs and plain paths). Encoded outputs are kept in memory
//! under `memory://export/<n>.<ext>` until the host takes them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage, FilterType};
use crate::edit::OutputFormat;
use crate::encode::{encode, EncodeError};
use crate::export::{ExportResult, TransformEngine};
use crate::geometry::{CropRect, Dimensions, ResizeTarget};
use crate::transform::{apply_crop, flip_horizontal, resize_to_target, rotate_clockwise};

const OUTPUT_PREFIX: &str = "memory://export/";

/// Failures of the in-process engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// No registered source and nothing on disk under this URI.
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An encoded export held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAsset {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

/// Pixel engine for native hosts and the WASM worker.
#[derive(Debug, Default)]
pub struct PixelEngine {
    filter: FilterType,
    sources: Mutex<HashMap<String, Arc<Vec<u8>>>>,
    outputs: Mutex<HashMap<String, EncodedAsset>>,
    next_id: AtomicU64,
}

impl PixelEngine {
    pub fn new(filter: FilterType) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// Make encoded `bytes` loadable under `uri`.
    pub fn register_source(&self, uri: impl Into<String>, bytes: Vec<u8>) {
        let uri = uri.into();
        tracing::debug!(uri = %uri, bytes = bytes.len(), "Source registered");
        lock(&self.sources).insert(uri, Arc::new(bytes));
    }

    /// Remove and return an encoded output.
    pub fn take_output(&self, uri: &str) -> Option<EncodedAsset> {
        lock(&self.outputs).remove(uri)
    }

    /// Copy of an encoded output, leaving it in place.
    pub fn output(&self, uri: &str) -> Option<EncodedAsset> {
        lock(&self.outputs).get(uri).cloned()
    }

    fn load_sync(&self, uri: &str) -> Result<DecodedImage, EngineError> {
        let registered = lock(&self.sources).get(uri).cloned();
        let bytes = match registered {
            Some(bytes) => bytes,
            None => Arc::new(read_file(uri)?),
        };
        Ok(decode_image(&bytes)?)
    }

    fn encode_sync(
        &self,
        image: &DecodedImage,
        quality: f64,
        format: OutputFormat,
    ) -> Result<ExportResult, EngineError> {
        let bytes = encode(image, quality, format)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let uri = format!("{OUTPUT_PREFIX}{id}.{}", format.extension());

        lock(&self.outputs).insert(
            uri.clone(),
            EncodedAsset {
                bytes,
                width: image.width,
                height: image.height,
                format,
            },
        );

        Ok(ExportResult {
            uri,
            width: image.width,
            height: image.height,
        })
    }
}

impl TransformEngine for PixelEngine {
    type Image = DecodedImage;
    type Error = EngineError;

    async fn load(&self, uri: &str) -> Result<DecodedImage, EngineError> {
        self.load_sync(uri)
    }

    fn dimensions(&self, image: &DecodedImage) -> Dimensions {
        Dimensions {
            width: image.width,
            height: image.height,
        }
    }

    async fn rotate(&self, image: DecodedImage, degrees: f64) -> Result<DecodedImage, EngineError> {
        Ok(rotate_clockwise(&image, degrees, self.filter))
    }

    async fn flip_horizontal(&self, image: DecodedImage) -> Result<DecodedImage, EngineError> {
        Ok(flip_horizontal(&image))
    }

    async fn crop(&self, image: DecodedImage, rect: CropRect) -> Result<DecodedImage, EngineError> {
        Ok(apply_crop(&image, &rect))
    }

    async fn resize(
        &self,
        image: DecodedImage,
        target: ResizeTarget,
    ) -> Result<DecodedImage, EngineError> {
        Ok(resize_to_target(&image, target, self.filter)?)
    }

    async fn encode(
        &self,
        image: DecodedImage,
        quality: f64,
        format: OutputFormat,
    ) -> Result<ExportResult, EngineError> {
        self.encode_sync(&image, quality, format)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_file(uri: &str) -> Result<Vec<u8>, EngineError> {
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    if path.contains("://") {
        return Err(EngineError::SourceNotFound(uri.to_string()));
    }
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EngineError::SourceNotFound(uri.to_string()),
        _ => EngineError::Io(e),
    })
}
