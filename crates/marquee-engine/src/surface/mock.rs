//! In-memory platform for tests.

use crate::coords::{ColorRgba, ViewportRect};
use crate::device::{DisplayError, FramebufferHints, SwapInterval};
use crate::geometry::Projection;

use super::{Platform, WindowIcon, WindowRequest};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Init,
    Shutdown,
    ShowCursor(bool),
    CreateWindow(WindowRequest),
    SetIcon(u32, u32),
    CreateContext(u32),
    SwapInterval(SwapInterval),
    ApplyProjection(ViewportRect),
    SwapBuffers(ColorRgba),
    DestroyContext(u32),
    DestroyWindow(u32),
}

#[derive(Debug)]
pub(crate) struct MockWindow {
    pub id: u32,
    pub size: (u32, u32),
}

#[derive(Debug)]
pub(crate) struct MockContext {
    pub id: u32,
    pub interval: Option<SwapInterval>,
    pub projection: Option<Projection>,
    pub presented: u32,
}

pub(crate) struct MockPlatform {
    pub calls: Vec<Call>,
    pub cursor_visible: bool,
    pub native: Option<(u32, u32)>,
    /// Size handed out instead of the requested one.
    pub achieved_size: Option<(u32, u32)>,
    pub refused_intervals: Vec<SwapInterval>,
    pub fail_init: bool,
    pub fail_window: bool,
    pub fail_context: bool,
    pub fail_swap: bool,
    pub live_windows: u32,
    next_id: u32,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            cursor_visible: true,
            native: Some((1920, 1080)),
            achieved_size: None,
            refused_intervals: Vec::new(),
            fail_init: false,
            fail_window: false,
            fail_context: false,
            fail_swap: false,
            live_windows: 0,
            next_id: 1,
        }
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;
    type Context = MockContext;

    fn init(&mut self) -> Result<(), DisplayError> {
        self.calls.push(Call::Init);
        if self.fail_init {
            return Err(DisplayError::PlatformInit("mock init failure".into()));
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.calls.push(Call::Shutdown);
    }

    fn show_cursor(&mut self, visible: bool) -> bool {
        self.calls.push(Call::ShowCursor(visible));
        std::mem::replace(&mut self.cursor_visible, visible)
    }

    fn native_resolution(&self) -> Option<(u32, u32)> {
        self.native
    }

    fn create_window(&mut self, request: &WindowRequest) -> Result<MockWindow, DisplayError> {
        self.calls.push(Call::CreateWindow(request.clone()));
        if self.fail_window {
            return Err(DisplayError::WindowCreation("mock window failure".into()));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.live_windows += 1;

        Ok(MockWindow {
            id,
            size: self.achieved_size.unwrap_or((request.width, request.height)),
        })
    }

    fn set_window_icon(&mut self, _window: &MockWindow, icon: WindowIcon) -> Result<(), String> {
        self.calls.push(Call::SetIcon(icon.width, icon.height));
        Ok(())
    }

    fn window_size(&self, window: &MockWindow) -> (u32, u32) {
        window.size
    }

    fn create_context(
        &mut self,
        window: &MockWindow,
        _hints: &FramebufferHints,
    ) -> Result<MockContext, DisplayError> {
        self.calls.push(Call::CreateContext(window.id));
        if self.fail_context {
            return Err(DisplayError::GraphicsContext("mock context failure".into()));
        }

        Ok(MockContext {
            id: window.id,
            interval: None,
            projection: None,
            presented: 0,
        })
    }

    fn set_swap_interval(
        &mut self,
        context: &mut MockContext,
        interval: SwapInterval,
    ) -> Result<(), String> {
        self.calls.push(Call::SwapInterval(interval));
        if self.refused_intervals.contains(&interval) {
            return Err(format!("{interval:?} refused"));
        }
        context.interval = Some(interval);
        Ok(())
    }

    fn apply_projection(&mut self, context: &mut MockContext, projection: &Projection) {
        self.calls.push(Call::ApplyProjection(projection.viewport()));
        context.projection = Some(*projection);
    }

    fn swap_buffers(
        &mut self,
        _window: &MockWindow,
        context: &mut MockContext,
        clear: ColorRgba,
    ) -> Result<(), DisplayError> {
        self.calls.push(Call::SwapBuffers(clear));
        if self.fail_swap {
            return Err(DisplayError::SurfaceLost("mock out of memory".into()));
        }
        context.presented += 1;
        Ok(())
    }

    fn destroy_context(&mut self, context: MockContext) {
        self.calls.push(Call::DestroyContext(context.id));
    }

    fn destroy_window(&mut self, window: MockWindow) {
        self.calls.push(Call::DestroyWindow(window.id));
        self.live_windows -= 1;
    }
}
