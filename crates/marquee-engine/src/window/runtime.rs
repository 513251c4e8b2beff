use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::config::DisplayConfig;
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::DisplayError;
use crate::renderer::WinitRenderer;
use crate::surface::{CursorState, SurfaceOptions, WinitPlatform};

/// Display + surface configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub display: DisplayConfig,
    pub surface: SurfaceOptions,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the app exits or the display fails.
    ///
    /// A failed renderer init or a lost surface is returned as the error.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new()
            .map_err(|e| DisplayError::PlatformInit(e.to_string()))
            .context("failed to create winit EventLoop")?;

        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(anyhow::Error::new(err).context("display failure")),
            None => Ok(()),
        }
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    app: A,

    renderer: WinitRenderer,
    cursor: CursorState,
    frame_index: u64,

    error: Option<DisplayError>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            renderer: WinitRenderer::new(),
            cursor: CursorState::default(),
            frame_index: 0,
            error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DisplayError) {
        log::error!("{err}");
        self.error = Some(err);
        self.request_exit(event_loop);
    }

    /// Presents the pending frame (if any) and acquires the next one.
    fn swap(&mut self, event_loop: &ActiveEventLoop) {
        let result = {
            let mut platform = WinitPlatform::new(event_loop, &mut self.cursor);
            self.renderer.swap_buffers(&mut platform)
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn draw_frame(&mut self, event_loop: &ActiveEventLoop) {
        let control = {
            let Some((window, context, geometry, projection)) = self.renderer.frame_parts() else {
                return;
            };

            let mut ctx = FrameCtx {
                window,
                geometry,
                projection,
                target: context.frame_target(),
                frame_index: self.frame_index,
            };

            self.app.on_frame(&mut ctx)
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        if control == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        self.swap(event_loop);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_initialized() || self.exit_requested {
            return;
        }

        let result = {
            let mut platform = WinitPlatform::new(event_loop, &mut self.cursor);
            self.renderer
                .init(&mut platform, &self.config.display, &self.config.surface)
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
            return;
        }

        if let Some(geometry) = self.renderer.geometry() {
            self.app.on_init(geometry);
        }

        // Prime the first cleared frame.
        self.swap(event_loop);

        if let Some(window) = self.renderer.window() {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is paced by the swap interval.
        if let Some(window) = self.renderer.window() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Pressed
                    && key.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("window resized to {}x{}", new_size.width, new_size.height);
                if let Some(context) = self.renderer.context_mut() {
                    context.resize(*new_size);
                }
                self.swap(event_loop);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.renderer.window().map(|w| w.inner_size());
                if let (Some(size), Some(context)) = (new_size, self.renderer.context_mut()) {
                    context.resize(size);
                }
                self.swap(event_loop);
            }

            WindowEvent::RedrawRequested => self.draw_frame(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        if !self.renderer.is_initialized() {
            return;
        }

        self.app.on_exit();

        let mut platform = WinitPlatform::new(event_loop, &mut self.cursor);
        self.renderer.deinit(&mut platform);
    }
}
