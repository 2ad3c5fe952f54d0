//! Export bindings.
//!
//! Two ways to commit an edit from JavaScript:
//!
//! - [`plan_export`] returns the ordered steps as a plain object, for hosts
//!   that run rotate/flip/crop/resize/encode on a native image engine
//! - [`export_image`] decodes the source bytes and runs the whole plan here
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_source(bytes);
//! const session = new JsEditSession(uri, source.width, source.height, {});
//! const surface = new JsCropSurface(session, frame.width, frame.height);
//! // ... gestures and toolbar actions ...
//! const asset = export_image(bytes, session, surface);
//! const blob = new Blob([asset.bytes()], { type: asset.mime_type });
//! ```

use reframe_core::decode::decode_image;
use reframe_core::edit::OutputFormat;
use reframe_core::encode::encode;
use reframe_core::export::{ExportPlan, ExportRequest};
use reframe_core::render::render_plan;
use wasm_bindgen::prelude::*;

use crate::session::JsEditSession;
use crate::surface::JsCropSurface;
use crate::types::{to_js, to_js_error, JsDecodedImage};

/// Encoded export output.
#[wasm_bindgen]
pub struct JsEncodedImage {
    width: u32,
    height: u32,
    format: OutputFormat,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsEncodedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// File extension without the dot: `jpg`, `png` or `webp`.
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.format.extension().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.format.mime_type().to_string()
    }

    /// Encoded bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// Decode source bytes, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// The export plan for the session's current state and the surface's live
/// view.
#[wasm_bindgen]
pub fn plan_export(session: &JsEditSession, surface: &JsCropSurface) -> Result<JsValue, JsValue> {
    let plan = build_plan(session, surface).map_err(to_js_error)?;
    to_js(&plan)
}

/// Decode, transform and encode in one call.
///
/// The resampling filter comes from the session's configuration.
#[wasm_bindgen]
pub fn export_image(
    bytes: &[u8],
    session: &JsEditSession,
    surface: &JsCropSurface,
) -> Result<JsEncodedImage, JsValue> {
    run_export(bytes, session, surface).map_err(|e| JsValue::from_str(&e))
}

fn build_plan(
    session: &JsEditSession,
    surface: &JsCropSurface,
) -> Result<ExportPlan, reframe_core::ValidationError> {
    let request =
        ExportRequest::from_session(session.inner(), surface.frame()).with_view(surface.view());
    ExportPlan::build(&request)
}

fn run_export(
    bytes: &[u8],
    session: &JsEditSession,
    surface: &JsCropSurface,
) -> Result<JsEncodedImage, String> {
    let plan = build_plan(session, surface).map_err(|e| e.to_string())?;
    let source = decode_image(bytes).map_err(|e| e.to_string())?;
    let filter = session.inner().config().filter;
    let rendered = render_plan(source, &plan, filter).map_err(|e| e.to_string())?;

    let settings = plan.encode();
    let encoded = encode(&rendered, settings.quality, settings.format).map_err(|e| e.to_string())?;
    Ok(JsEncodedImage {
        width: rendered.width,
        height: rendered.height,
        format: settings.format,
        bytes: encoded,
    })
}
