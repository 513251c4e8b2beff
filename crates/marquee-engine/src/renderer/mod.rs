//! Display renderer.
//!
//! [`Renderer`] owns the live surface together with the geometry and
//! projection derived from it. It is held by the top-level control loop and
//! driven from the thread that owns the graphics context.

mod display;

pub use display::{Renderer, WinitRenderer};
