use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Icon, Window};

use crate::coords::ColorRgba;
use crate::device::{DisplayError, FramebufferHints, GraphicsContext, SwapInterval};
use crate::geometry::Projection;

use super::{Platform, WindowIcon, WindowRequest};

/// Pointer visibility tracked across event-loop callbacks.
///
/// winit applies visibility per window and cannot report it, so the value
/// lives here and is pushed onto each window the platform creates.
#[derive(Debug, Copy, Clone)]
pub struct CursorState {
    visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl CursorState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// winit + wgpu platform.
///
/// Borrowed for the duration of one event-loop callback; the runtime owns the
/// cursor state between callbacks.
pub struct WinitPlatform<'a> {
    event_loop: &'a ActiveEventLoop,
    cursor: &'a mut CursorState,
}

impl<'a> WinitPlatform<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, cursor: &'a mut CursorState) -> Self {
        Self { event_loop, cursor }
    }

    fn primary_monitor(&self) -> Option<MonitorHandle> {
        self.event_loop
            .primary_monitor()
            .or_else(|| self.event_loop.available_monitors().next())
    }

    /// Borderless when the request matches the desktop mode, otherwise an
    /// exclusive mode of the requested size if the monitor offers one.
    fn fullscreen_mode(&self, width: u32, height: u32) -> Fullscreen {
        let monitor = self.primary_monitor();

        let desktop_size = monitor.as_ref().map(|m| m.size());
        if desktop_size == Some(PhysicalSize::new(width, height)) {
            return Fullscreen::Borderless(monitor);
        }

        let exclusive = monitor.as_ref().and_then(|m| {
            m.video_modes()
                .filter(|mode| mode.size() == PhysicalSize::new(width, height))
                .max_by_key(|mode| (mode.bit_depth(), mode.refresh_rate_millihertz()))
        });

        match exclusive {
            Some(mode) => Fullscreen::Exclusive(mode),
            None => {
                log::debug!("no {width}x{height} video mode; using borderless fullscreen");
                Fullscreen::Borderless(monitor)
            }
        }
    }
}

impl Platform for WinitPlatform<'_> {
    type Window = Arc<Window>;
    type Context = GraphicsContext;

    fn init(&mut self) -> Result<(), DisplayError> {
        if self.event_loop.exiting() {
            return Err(DisplayError::PlatformInit("event loop is exiting".to_string()));
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.event_loop.exit();
    }

    fn show_cursor(&mut self, visible: bool) -> bool {
        std::mem::replace(&mut self.cursor.visible, visible)
    }

    fn native_resolution(&self) -> Option<(u32, u32)> {
        self.primary_monitor()
            .map(|m| m.size())
            .filter(|s| s.width > 0 && s.height > 0)
            .map(|s| (s.width, s.height))
    }

    fn create_window(&mut self, request: &WindowRequest) -> Result<Arc<Window>, DisplayError> {
        let mut attrs = Window::default_attributes()
            .with_title(request.title.clone())
            .with_inner_size(PhysicalSize::new(request.width, request.height));

        if request.fullscreen {
            attrs = attrs.with_fullscreen(Some(self.fullscreen_mode(request.width, request.height)));
        }

        let window = self
            .event_loop
            .create_window(attrs)
            .map_err(|e| DisplayError::WindowCreation(e.to_string()))?;

        window.set_cursor_visible(self.cursor.visible);

        Ok(Arc::new(window))
    }

    fn set_window_icon(&mut self, window: &Arc<Window>, icon: WindowIcon) -> Result<(), String> {
        let icon = Icon::from_rgba(icon.rgba, icon.width, icon.height).map_err(|e| e.to_string())?;
        window.set_window_icon(Some(icon));
        Ok(())
    }

    fn window_size(&self, window: &Arc<Window>) -> (u32, u32) {
        let size = window.inner_size();
        (size.width, size.height)
    }

    fn create_context(
        &mut self,
        window: &Arc<Window>,
        hints: &FramebufferHints,
    ) -> Result<GraphicsContext, DisplayError> {
        pollster::block_on(GraphicsContext::new(Arc::clone(window), hints))
            .map_err(|e| DisplayError::GraphicsContext(format!("{e:#}")))
    }

    fn set_swap_interval(
        &mut self,
        context: &mut GraphicsContext,
        interval: SwapInterval,
    ) -> Result<(), String> {
        context.set_present_mode(interval.present_mode())
    }

    fn apply_projection(&mut self, context: &mut GraphicsContext, projection: &Projection) {
        context.upload_projection(projection);
    }

    fn swap_buffers(
        &mut self,
        window: &Arc<Window>,
        context: &mut GraphicsContext,
        clear: ColorRgba,
    ) -> Result<(), DisplayError> {
        window.pre_present_notify();
        context.swap_buffers(clear)
    }
}
