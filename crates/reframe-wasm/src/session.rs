//! Edit session bindings.
//!
//! Actions come in as the same tagged objects the core deserializes, e.g.
//! `{ type: 'SET_STRAIGHTEN', degrees: 3.5 }`. Every dispatch returns the new
//! snapshot so the host can re-render from a single value.

use reframe_core::config::EditorConfig;
use reframe_core::edit::{EditAction, EditSession};
use reframe_core::geometry::Dimensions;
use wasm_bindgen::prelude::*;

use crate::types::{from_js, to_js, to_js_error};

/// An editing session over one source asset.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Open a session. `config` may be `undefined` or a partial
    /// `EditorConfig` object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        source_uri: String,
        width: u32,
        height: u32,
        config: JsValue,
    ) -> Result<JsEditSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            from_js(config, "editor config")?
        };
        Self::open(source_uri, width, height, config).map_err(to_js_error)
    }

    /// Apply an action and return the resulting snapshot.
    pub fn dispatch(&mut self, action: JsValue) -> Result<JsValue, JsValue> {
        let action: EditAction = from_js(action, "edit action")?;
        self.inner.dispatch(action);
        self.snapshot()
    }

    /// Current snapshot as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.snapshot())
    }

    /// Stored view transform (`{ scale, tx, ty }`).
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.view())
    }

    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.config())
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn source_uri(&self) -> String {
        self.inner.source_uri().to_string()
    }

    /// Effective `[width, height]` for the current rotation and straighten.
    pub fn effective_size(&self) -> Vec<u32> {
        let size = self.inner.effective_size();
        vec![size.width, size.height]
    }
}

impl JsEditSession {
    pub(crate) fn open(
        source_uri: String,
        width: u32,
        height: u32,
        config: EditorConfig,
    ) -> Result<Self, reframe_core::ValidationError> {
        let inner = EditSession::with_config(source_uri, Dimensions { width, height }, config)?;
        Ok(Self { inner })
    }

    pub(crate) fn inner(&self) -> &EditSession {
        &self.inner
    }

    #[cfg(test)]
    pub(crate) fn dispatch_action(&mut self, action: EditAction) {
        self.inner.dispatch(action);
    }
}
