//! Runs a [`CropSurface`] on its own task.
//!
//! Gesture callbacks only push [`GestureEvent`]s into a channel. The actor
//! folds them into the surface, publishes the live view on a `watch` channel
//! every frame, and sends [`SurfaceEvent`]s to the owner at gesture
//! boundaries. Nothing else crosses between the two contexts.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use super::{CropSurface, SurfaceEvent};
use crate::geometry::{Dimensions, FrameSize, ViewTransform};

/// Raw input from the host's gesture recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    PanBegin,
    PanUpdate {
        dx: f64,
        dy: f64,
    },
    PanEnd,
    PinchBegin,
    #[serde(rename_all = "camelCase")]
    PinchUpdate {
        factor: f64,
        focal_x: f64,
        focal_y: f64,
    },
    PinchEnd,
    DoubleTap,
    /// The crop frame or effective image size changed.
    Layout {
        effective: Dimensions,
        frame: FrameSize,
    },
    /// The owner replaced the view (undo, redo, rotate).
    ResetView {
        view: ViewTransform,
    },
}

impl CropSurface {
    /// Apply one event. Returns the boundary event, if any.
    pub fn handle(&mut self, event: GestureEvent) -> Option<SurfaceEvent> {
        match event {
            GestureEvent::PanBegin => self.pan_begin(),
            GestureEvent::PanUpdate { dx, dy } => {
                self.pan_update(dx, dy);
                None
            }
            GestureEvent::PanEnd => self.pan_end(),
            GestureEvent::PinchBegin => self.pinch_begin(),
            GestureEvent::PinchUpdate {
                factor,
                focal_x,
                focal_y,
            } => {
                self.pinch_update(factor, focal_x, focal_y);
                None
            }
            GestureEvent::PinchEnd => self.pinch_end(),
            GestureEvent::DoubleTap => self.double_tap(),
            GestureEvent::Layout { effective, frame } => self.set_layout(effective, frame),
            GestureEvent::ResetView { view } => self.reset_view(view),
        }
    }
}

/// Sending half held by the gesture recognizers.
#[derive(Debug, Clone)]
pub struct GestureHandle {
    events: mpsc::UnboundedSender<GestureEvent>,
    view: watch::Receiver<ViewTransform>,
}

impl GestureHandle {
    /// Queue an event. Returns `false` once the actor has stopped.
    pub fn send(&self, event: GestureEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Latest live view, for drawing the current frame.
    pub fn view(&self) -> ViewTransform {
        *self.view.borrow()
    }

    /// Subscribe to per-frame view updates.
    pub fn watch(&self) -> watch::Receiver<ViewTransform> {
        self.view.clone()
    }
}

/// Owns the surface while it runs.
#[derive(Debug)]
pub struct GestureActor {
    surface: CropSurface,
    events: mpsc::UnboundedReceiver<GestureEvent>,
    output: mpsc::UnboundedSender<SurfaceEvent>,
    view: watch::Sender<ViewTransform>,
}

impl GestureActor {
    /// Create the actor together with the handle for input and the receiver
    /// for boundary events.
    pub fn new(
        surface: CropSurface,
    ) -> (Self, GestureHandle, mpsc::UnboundedReceiver<SurfaceEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(surface.view());

        let actor = Self {
            surface,
            events: event_rx,
            output: output_tx,
            view: view_tx,
        };
        let handle = GestureHandle {
            events: event_tx,
            view: view_rx,
        };
        (actor, handle, output_rx)
    }

    /// Process events until every [`GestureHandle`] is dropped, then hand the
    /// surface back.
    pub async fn run(mut self) -> CropSurface {
        tracing::debug!("Gesture actor started");
        while let Some(event) = self.events.recv().await {
            let boundary = self.surface.handle(event);
            self.view.send_replace(self.surface.view());

            if let Some(boundary) = boundary {
                if self.output.send(boundary).is_err() {
                    tracing::debug!("Surface event receiver dropped");
                }
            }
        }
        tracing::debug!("Gesture actor stopped");
        self.surface
    }
}
