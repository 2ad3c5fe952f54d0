//! Interactive crop surface.
//!
//! The surface keeps the live view transform while the user pans, pinches
//! and double-taps. It reports back to the edit session only when an
//! interaction begins and when it settles:
//!
//! | Input | Per frame | At the boundary |
//! |-------|-----------|-----------------|
//! | Pan | `tx += dx`, `ty += dy`, unclamped | clamp pan |
//! | Pinch | focal-point zoom, scale in `[minScale * rubberBand, maxScale]` | clamp scale, then pan |
//! | Double tap | | reset to `{minScale, 0, 0}` |
//!
//! [`CropSurface`] is the synchronous state; [`GestureActor`] drives one
//! from a channel on a separate task.

mod actor;
mod gesture;

pub use actor::{GestureActor, GestureEvent, GestureHandle};
pub use gesture::{CropSurface, Settle, SurfaceEvent};
