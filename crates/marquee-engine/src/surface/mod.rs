//! Native rendering surface lifecycle.
//!
//! The surface manager creates and destroys the window + graphics context pair
//! through a [`Platform`]. [`WinitPlatform`] is the winit/wgpu implementation;
//! tests drive the same code through an in-memory platform.

mod icon;
mod manager;
mod platform;
mod winit_platform;

#[cfg(test)]
pub(crate) mod mock;

pub use icon::{decode_icon, WindowIcon, EMBEDDED_ICON_PNG};
pub use manager::{create_surface, destroy_surface, SurfaceOptions, SurfaceState, SurfaceWarning};
pub use platform::{Platform, WindowRequest};
pub use winit_platform::{CursorState, WinitPlatform};
