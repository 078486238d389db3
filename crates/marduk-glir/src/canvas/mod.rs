//! Surface tracking.
//!
//! Keeps the per-thread notion of "the current canvas", which decides where
//! GPU objects created without an explicit surface end up.

mod registry;
mod surface;

pub use registry::{
    current_canvas, forget_canvas, set_current_canvas, with_canvas_registry, CanvasRegistry,
};
pub use surface::{Canvas, Surface};
