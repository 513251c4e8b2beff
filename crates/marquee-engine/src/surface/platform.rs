use crate::coords::ColorRgba;
use crate::device::{DisplayError, FramebufferHints, SwapInterval};
use crate::geometry::Projection;

use super::WindowIcon;

/// Parameters for the native window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

/// Windowing + graphics backend used by the surface manager.
///
/// Implementations are single-threaded and must be driven from the thread
/// that owns the graphics context. Windows and contexts are released by
/// dropping them; the `destroy_*` hooks exist so implementations can observe
/// the order.
pub trait Platform {
    type Window;
    type Context;

    /// Brings the windowing subsystem up.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Shuts the windowing subsystem down. Called once per successful `init`.
    fn shutdown(&mut self);

    /// Sets pointer visibility and returns the previous visibility.
    fn show_cursor(&mut self, visible: bool) -> bool;

    /// Native display resolution, if the platform reports one.
    fn native_resolution(&self) -> Option<(u32, u32)>;

    fn create_window(&mut self, request: &WindowRequest) -> Result<Self::Window, DisplayError>;

    fn set_window_icon(&mut self, window: &Self::Window, icon: WindowIcon) -> Result<(), String>;

    /// Size the platform actually gave the window.
    fn window_size(&self, window: &Self::Window) -> (u32, u32);

    fn create_context(
        &mut self,
        window: &Self::Window,
        hints: &FramebufferHints,
    ) -> Result<Self::Context, DisplayError>;

    /// Returns an error message when the interval is refused.
    fn set_swap_interval(
        &mut self,
        context: &mut Self::Context,
        interval: SwapInterval,
    ) -> Result<(), String>;

    /// Applies the viewport and uploads the projection transform.
    fn apply_projection(&mut self, context: &mut Self::Context, projection: &Projection);

    /// Presents the current frame and clears color + depth for the next one.
    fn swap_buffers(
        &mut self,
        window: &Self::Window,
        context: &mut Self::Context,
        clear: ColorRgba,
    ) -> Result<(), DisplayError>;

    fn destroy_context(&mut self, context: Self::Context) {
        drop(context);
    }

    fn destroy_window(&mut self, window: Self::Window) {
        drop(window);
    }
}
