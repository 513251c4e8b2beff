//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and drives the renderer: init on resume, one
//! app frame plus a buffer swap per redraw, teardown on exit.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
