//! Reframe WASM - WebAssembly bindings for the Reframe editor core
//!
//! Exposes the edit session, the crop surface and the export renderer to a
//! JavaScript host. Structured values (actions, snapshots, views, plans)
//! cross the boundary as plain JS objects via `serde-wasm-bindgen`; errors
//! are thrown as strings.
//!
//! # Module Structure
//!
//! - `session` - Edit state machine with undo/redo
//! - `surface` - Pan, pinch and double-tap on the crop frame
//! - `geometry` - Pure fit/clamp/crop math for layout code
//! - `export` - Plan an export, or decode, render and encode it in-process
//! - `types` - Image wrapper types shared by the bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, JsCropSurface, export_image } from '@reframe/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession('file:///photo.jpg', 4000, 3000, {});
//! session.dispatch({ type: 'SET_ASPECT', preset: '1:1' });
//! session.dispatch({ type: 'ROTATE_CW' });
//!
//! const surface = new JsCropSurface(session, frame.width, frame.height);
//! // feed pan/pinch callbacks into the surface ...
//! const asset = export_image(bytes, session, surface);
//! ```

use wasm_bindgen::prelude::*;

mod export;
mod geometry;
mod session;
mod surface;
mod types;

pub use export::{decode_source, export_image, plan_export, JsEncodedImage};
pub use geometry::{crop_rect, effective_size, frame_for_preset, min_scale};
pub use session::JsEditSession;
pub use surface::JsCropSurface;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
