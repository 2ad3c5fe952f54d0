//! Crop surface bindings.
//!
//! The host's gesture recognizer feeds raw pan/pinch/tap callbacks in.
//! Begin/end calls return a boundary event (`interactionStarted` or
//! `settled`) or `null`; update calls return nothing so the hot path stays
//! allocation-free on the JS side. Read `scale`, `tx`, `ty` each frame.

use reframe_core::config::SurfaceLimits;
use reframe_core::geometry::{Dimensions, FrameSize, ViewTransform};
use reframe_core::surface::{CropSurface, GestureEvent, SurfaceEvent};
use wasm_bindgen::prelude::*;

use crate::session::JsEditSession;
use crate::types::{from_js, to_js};

/// Interactive crop frame over the effective image.
#[wasm_bindgen]
pub struct JsCropSurface {
    inner: CropSurface,
}

#[wasm_bindgen]
impl JsCropSurface {
    /// Build a surface for `session` showing its stored view, clamped to the
    /// frame.
    #[wasm_bindgen(constructor)]
    pub fn new(session: &JsEditSession, frame_width: f64, frame_height: f64) -> JsCropSurface {
        let session = session.inner();
        Self::from_parts(
            session.effective_size(),
            FrameSize {
                width: frame_width,
                height: frame_height,
            },
            session.view(),
            session.config().surface_limits(),
        )
    }

    /// Feed any gesture as a tagged object, e.g. `{ type: 'pinchUpdate', ... }`.
    pub fn handle(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: GestureEvent = from_js(event, "gesture event")?;
        emit(self.inner.handle(event))
    }

    pub fn pan_begin(&mut self) -> Result<JsValue, JsValue> {
        emit(self.inner.pan_begin())
    }

    pub fn pan_update(&mut self, dx: f64, dy: f64) {
        self.inner.pan_update(dx, dy);
    }

    pub fn pan_end(&mut self) -> Result<JsValue, JsValue> {
        emit(self.inner.pan_end())
    }

    pub fn pinch_begin(&mut self) -> Result<JsValue, JsValue> {
        emit(self.inner.pinch_begin())
    }

    /// `factor` is cumulative since `pinch_begin`; the focal point is in
    /// frame coordinates relative to the frame centre.
    pub fn pinch_update(&mut self, factor: f64, focal_x: f64, focal_y: f64) {
        self.inner.pinch_update(factor, focal_x, focal_y);
    }

    pub fn pinch_end(&mut self) -> Result<JsValue, JsValue> {
        emit(self.inner.pinch_end())
    }

    pub fn double_tap(&mut self) -> Result<JsValue, JsValue> {
        emit(self.inner.double_tap())
    }

    /// New effective size or frame (rotate, straighten, aspect change).
    pub fn set_layout(
        &mut self,
        eff_width: u32,
        eff_height: u32,
        frame_width: f64,
        frame_height: f64,
    ) -> Result<JsValue, JsValue> {
        emit(self.inner.set_layout(
            Dimensions {
                width: eff_width,
                height: eff_height,
            },
            FrameSize {
                width: frame_width,
                height: frame_height,
            },
        ))
    }

    /// Jump to a view, e.g. after undo restored one.
    pub fn reset_view(&mut self, view: JsValue) -> Result<JsValue, JsValue> {
        let view: ViewTransform = from_js(view, "view transform")?;
        emit(self.inner.reset_view(view))
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.view().scale
    }

    #[wasm_bindgen(getter)]
    pub fn tx(&self) -> f64 {
        self.inner.view().tx
    }

    #[wasm_bindgen(getter)]
    pub fn ty(&self) -> f64 {
        self.inner.view().ty
    }

    #[wasm_bindgen(getter)]
    pub fn min_scale(&self) -> f64 {
        self.inner.min_scale()
    }

    #[wasm_bindgen(getter)]
    pub fn max_scale(&self) -> f64 {
        self.inner.max_scale()
    }

    #[wasm_bindgen(getter)]
    pub fn is_interacting(&self) -> bool {
        self.inner.is_interacting()
    }
}

impl JsCropSurface {
    pub(crate) fn from_parts(
        effective: Dimensions,
        frame: FrameSize,
        view: ViewTransform,
        limits: SurfaceLimits,
    ) -> Self {
        Self {
            inner: CropSurface::new(effective, frame, view, limits),
        }
    }

    pub(crate) fn view(&self) -> ViewTransform {
        self.inner.view()
    }

    pub(crate) fn frame(&self) -> FrameSize {
        self.inner.frame()
    }
}

fn emit(event: Option<SurfaceEvent>) -> Result<JsValue, JsValue> {
    match event {
        Some(event) => to_js(&event),
        None => Ok(JsValue::NULL),
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_double_tap_emits_settled() {
        let mut surface = JsCropSurface::from_parts(
            Dimensions {
                width: 1000,
                height: 1000,
            },
            FrameSize {
                width: 400.0,
                height: 500.0,
            },
            ViewTransform::new(2.0, 100.0, 0.0),
            SurfaceLimits::default(),
        );
        let event = surface.double_tap().unwrap();
        assert!(!event.is_null());
        assert_eq!(surface.scale(), 0.5);
    }

    #[wasm_bindgen_test]
    fn test_pan_update_without_begin_is_ignored() {
        let mut surface = JsCropSurface::from_parts(
            Dimensions {
                width: 1000,
                height: 1000,
            },
            FrameSize {
                width: 400.0,
                height: 500.0,
            },
            ViewTransform::IDENTITY,
            SurfaceLimits::default(),
        );
        surface.pan_update(10.0, 10.0);
        assert_eq!(surface.tx(), 0.0);
        assert!(surface.pan_end().unwrap().is_null());
    }
}
