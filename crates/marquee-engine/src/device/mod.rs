//! Graphics context management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue bound to a window
//! - choosing surface and depth formats from framebuffer hints
//! - swap-interval (present mode) control
//! - uploading the projection uniform and applying the viewport
//! - presenting frames and clearing color + depth for the next one

mod context;
mod error;
mod frame;
mod hints;
mod swapchain;

pub use context::{GraphicsContext, ProjectionUniform};
pub use error::{DisplayError, SurfaceErrorAction};
pub use frame::{FrameTarget, GpuFrame};
pub use hints::{FramebufferHints, SwapInterval};
