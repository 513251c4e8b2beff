//! Marquee engine crate.
//!
//! Display plumbing for the frontend: settings, window + graphics context
//! lifecycle, screen geometry (size, offsets, rotation) and the projection
//! every draw call depends on, plus the runtime loop and the external video
//! overlay.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod overlay;
pub mod render;
pub mod renderer;
pub mod settings;
pub mod surface;
pub mod window;
