use winit::event::WindowEvent;

use crate::geometry::ScreenGeometry;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once the surface is live and the projection applied.
    fn on_init(&mut self, geometry: &ScreenGeometry) {
        let _ = geometry;
    }

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame, before the buffers are swapped.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called before the surface is torn down.
    fn on_exit(&mut self) {}
}
