//! Pan, pinch and double-tap handling for the crop frame.
//!
//! Per-frame updates are plain arithmetic on values the surface owns. The
//! geometry functions are only consulted at boundaries: when the layout
//! changes and when the last active gesture ends. That is also the only time
//! the surface produces a [`SurfaceEvent`] for its owner.
//!
//! Pan and pinch compose. Both contributions are measured from a shared
//! anchor view that is re-taken whenever a gesture starts or ends, so one
//! gesture finishing never makes the other jump.

use serde::{Deserialize, Serialize};

use crate::config::SurfaceLimits;
use crate::geometry::{clamp_pan, min_scale, Dimensions, FrameSize, ViewTransform};

/// A view change the owner should animate from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settle {
    pub from: ViewTransform,
    pub to: ViewTransform,
}

impl Settle {
    /// True when the gesture ended inside bounds and nothing needs animating.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// What crosses from the gesture context back to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// The first of a pan/pinch combination began.
    InteractionStarted { view: ViewTransform },
    /// All gestures ended, or the layout changed, and the view was clamped.
    Settled(Settle),
}

impl SurfaceEvent {
    /// The view the owner should hold after this event.
    pub fn view(&self) -> ViewTransform {
        match self {
            SurfaceEvent::InteractionStarted { view } => *view,
            SurfaceEvent::Settled(settle) => settle.to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanTrack {
    /// Translation already folded into the anchor.
    base: (f64, f64),
    latest: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchTrack {
    /// Cumulative factor already folded into the anchor.
    base_factor: f64,
    factor: f64,
    /// Focal point relative to the frame centre.
    focal: (f64, f64),
}

/// Live `(scale, tx, ty)` for one crop frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSurface {
    effective: Dimensions,
    frame: FrameSize,
    limits: SurfaceLimits,
    min_scale: f64,
    max_scale: f64,
    view: ViewTransform,
    anchor: ViewTransform,
    pan: Option<PanTrack>,
    pinch: Option<PinchTrack>,
}

impl CropSurface {
    /// Create a surface showing `view`, clamped into bounds.
    ///
    /// A zero-sized frame or image is a caller error; use the validating
    /// constructors in [`crate::geometry`] first.
    pub fn new(
        effective: Dimensions,
        frame: FrameSize,
        view: ViewTransform,
        limits: SurfaceLimits,
    ) -> Self {
        let mut surface = Self {
            effective,
            frame,
            limits,
            min_scale: 1.0,
            max_scale: 1.0,
            view,
            anchor: view,
            pan: None,
            pinch: None,
        };
        surface.derive_bounds();
        surface.view = surface.settled(view);
        surface.anchor = surface.view;
        surface
    }

    /// Current live transform.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn effective(&self) -> Dimensions {
        self.effective
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    pub fn is_interacting(&self) -> bool {
        self.pan.is_some() || self.pinch.is_some()
    }

    /// The frame or effective image changed (rotation, straighten, new
    /// aspect preset, device orientation).
    ///
    /// Re-derives the scale bounds. Outside a gesture the view is clamped
    /// right away; during one the clamp waits for the gesture to end.
    pub fn set_layout(&mut self, effective: Dimensions, frame: FrameSize) -> Option<SurfaceEvent> {
        self.effective = effective;
        self.frame = frame;
        self.derive_bounds();

        if self.is_interacting() {
            return None;
        }
        Some(self.settle())
    }

    /// Replace the view outside a gesture, e.g. after undo. Clamped.
    pub fn reset_view(&mut self, view: ViewTransform) -> Option<SurfaceEvent> {
        if self.is_interacting() {
            return None;
        }
        self.view = view;
        Some(self.settle())
    }

    pub fn pan_begin(&mut self) -> Option<SurfaceEvent> {
        let started = self.begin();
        self.pan = Some(PanTrack {
            base: (0.0, 0.0),
            latest: (0.0, 0.0),
        });
        started
    }

    /// `dx`/`dy` are the total translation since the pan began.
    pub fn pan_update(&mut self, dx: f64, dy: f64) {
        if let Some(pan) = self.pan.as_mut() {
            pan.latest = (dx, dy);
            self.recompute();
        }
    }

    pub fn pan_end(&mut self) -> Option<SurfaceEvent> {
        self.pan.take()?;
        self.end()
    }

    pub fn pinch_begin(&mut self) -> Option<SurfaceEvent> {
        let started = self.begin();
        self.pinch = Some(PinchTrack {
            base_factor: 1.0,
            factor: 1.0,
            focal: (0.0, 0.0),
        });
        started
    }

    /// `factor` is the cumulative pinch scale since the pinch began;
    /// `focal_x`/`focal_y` locate the fingers relative to the frame centre.
    pub fn pinch_update(&mut self, factor: f64, focal_x: f64, focal_y: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        if let Some(pinch) = self.pinch.as_mut() {
            pinch.factor = factor;
            pinch.focal = (focal_x, focal_y);
            self.recompute();
        }
    }

    pub fn pinch_end(&mut self) -> Option<SurfaceEvent> {
        self.pinch.take()?;
        self.end()
    }

    /// Snap back to cover fit, centred. Ignored while panning or pinching.
    pub fn double_tap(&mut self) -> Option<SurfaceEvent> {
        if self.is_interacting() {
            return None;
        }
        let from = self.view;
        let to = ViewTransform::new(self.min_scale, 0.0, 0.0);
        self.view = to;
        self.anchor = to;
        tracing::debug!(scale = to.scale, "Double tap reset");
        Some(SurfaceEvent::Settled(Settle { from, to }))
    }

    fn derive_bounds(&mut self) {
        self.min_scale = min_scale(self.effective, self.frame);
        self.max_scale = self.min_scale * self.limits.zoom_range.max(1.0);
    }

    fn begin(&mut self) -> Option<SurfaceEvent> {
        let first = !self.is_interacting();
        self.rebase();
        if first {
            tracing::debug!(scale = self.view.scale, "Interaction started");
            Some(SurfaceEvent::InteractionStarted { view: self.view })
        } else {
            None
        }
    }

    fn end(&mut self) -> Option<SurfaceEvent> {
        self.rebase();
        if self.is_interacting() {
            return None;
        }
        Some(self.settle())
    }

    /// Fold the active contributions into the anchor so they restart at zero.
    fn rebase(&mut self) {
        self.anchor = self.view;
        if let Some(pan) = self.pan.as_mut() {
            pan.base = pan.latest;
        }
        if let Some(pinch) = self.pinch.as_mut() {
            pinch.base_factor = pinch.factor;
        }
    }

    /// Per-frame update. Inline arithmetic only.
    fn recompute(&mut self) {
        let anchor = self.anchor;
        let mut scale = anchor.scale;
        let mut tx = anchor.tx;
        let mut ty = anchor.ty;

        if let Some(pinch) = self.pinch {
            let floor = self.min_scale * self.limits.rubber_band;
            let factor = pinch.factor / pinch.base_factor;
            scale = (anchor.scale * factor).max(floor).min(self.max_scale);

            // Keep the point under the fingers fixed on screen
            let ratio = scale / anchor.scale;
            let (fx, fy) = pinch.focal;
            tx = fx + ratio * (tx - fx);
            ty = fy + ratio * (ty - fy);
        }

        if let Some(pan) = self.pan {
            tx += pan.latest.0 - pan.base.0;
            ty += pan.latest.1 - pan.base.1;
        }

        self.view = ViewTransform { scale, tx, ty };
    }

    fn settle(&mut self) -> SurfaceEvent {
        let from = self.view;
        let to = self.settled(from);
        self.view = to;
        self.anchor = to;
        tracing::debug!(
            scale = to.scale,
            tx = to.tx,
            ty = to.ty,
            overshoot = from != to,
            "View settled"
        );
        SurfaceEvent::Settled(Settle { from, to })
    }

    /// `view` with scale in `[minScale, maxScale]` and pan inside bounds.
    fn settled(&self, view: ViewTransform) -> ViewTransform {
        let scale = if view.scale.is_finite() {
            view.scale.max(self.min_scale).min(self.max_scale)
        } else {
            self.min_scale
        };
        let (tx, ty) = clamp_pan(
            finite_or_zero(view.tx),
            finite_or_zero(view.ty),
            self.effective,
            self.frame,
            scale,
        );
        ViewTransform { scale, tx, ty }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
