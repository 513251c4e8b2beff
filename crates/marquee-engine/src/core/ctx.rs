use winit::window::Window;

use crate::device::FrameTarget;
use crate::geometry::{Projection, ScreenGeometry};

/// Per-frame context passed to `core::App::on_frame`.
///
/// `target` is the pending frame, already cleared. It is `None` when no frame
/// could be acquired (minimized window, transient surface error).
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub geometry: &'a ScreenGeometry,
    pub projection: &'a Projection,
    pub target: Option<FrameTarget<'a>>,
    pub frame_index: u64,
}

impl FrameCtx<'_> {
    /// Logical screen size, in the rotated frame drawing code works in.
    pub fn screen_size(&self) -> (u32, u32) {
        (self.geometry.screen_width(), self.geometry.screen_height())
    }
}
