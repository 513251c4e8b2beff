use std::sync::Arc;

use winit::window::Window;

use crate::config::DisplayConfig;
use crate::coords::ColorRgba;
use crate::device::{DisplayError, GraphicsContext};
use crate::geometry::{resolve_geometry, Projection, Rotation, ScreenGeometry};
use crate::surface::{create_surface, destroy_surface, Platform, SurfaceOptions, SurfaceState};

/// Renderer over the winit/wgpu platform.
pub type WinitRenderer = Renderer<Arc<Window>, GraphicsContext>;

/// Surface + geometry + projection for one display.
///
/// Geometry queries return zero (and no rotation) until `init` succeeds and
/// after `deinit`.
pub struct Renderer<W, C> {
    surface: SurfaceState<W, C>,
    geometry: Option<ScreenGeometry>,
    projection: Option<Projection>,
}

impl<W, C> Default for Renderer<W, C> {
    fn default() -> Self {
        Self {
            surface: SurfaceState::default(),
            geometry: None,
            projection: None,
        }
    }
}

impl<W, C> Renderer<W, C> {
    /// Opaque black with zero alpha.
    pub const CLEAR_COLOR: ColorRgba = ColorRgba::TRANSPARENT;

    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the surface, resolves the screen geometry against the window
    /// the platform produced and applies the projection.
    ///
    /// Calling `init` on an initialized renderer tears the old surface down first.
    pub fn init<P>(
        &mut self,
        platform: &mut P,
        config: &DisplayConfig,
        options: &SurfaceOptions,
    ) -> Result<(), DisplayError>
    where
        P: Platform<Window = W, Context = C>,
    {
        if self.is_initialized() {
            log::debug!("renderer re-initialized; releasing previous surface");
            self.deinit(platform);
        }

        let mut surface = create_surface(platform, config, options)?;

        let Some((window, context)) = surface.parts_mut() else {
            return Err(DisplayError::NotInitialized);
        };

        let geometry = resolve_geometry(config, platform.window_size(window));
        let projection = Projection::new(&geometry, config.offset_policy);
        platform.apply_projection(context, &projection);

        log::info!(
            "screen {}x{} (window {}x{}), offset {},{}, rotation {}°, viewport {:?}",
            geometry.screen_width(),
            geometry.screen_height(),
            geometry.window_width(),
            geometry.window_height(),
            geometry.screen_offset_x(),
            geometry.screen_offset_y(),
            geometry.rotation().degrees(),
            projection.viewport()
        );

        self.surface = surface;
        self.geometry = Some(geometry);
        self.projection = Some(projection);
        Ok(())
    }

    /// Boolean form of [`Renderer::init`]; failures are logged.
    pub fn init_ok<P>(&mut self, platform: &mut P, config: &DisplayConfig, options: &SurfaceOptions) -> bool
    where
        P: Platform<Window = W, Context = C>,
    {
        match self.init(platform, config, options) {
            Ok(()) => true,
            Err(err) => {
                log::error!("renderer init failed: {err}");
                false
            }
        }
    }

    /// Tears the surface down. A renderer that was never initialized is left as is.
    pub fn deinit<P>(&mut self, platform: &mut P)
    where
        P: Platform<Window = W, Context = C>,
    {
        destroy_surface(platform, &mut self.surface);
        self.geometry = None;
        self.projection = None;
    }

    /// Presents the current frame and clears the next one to [`Self::CLEAR_COLOR`].
    pub fn swap_buffers<P>(&mut self, platform: &mut P) -> Result<(), DisplayError>
    where
        P: Platform<Window = W, Context = C>,
    {
        let (window, context) = self.surface.parts_mut().ok_or(DisplayError::NotInitialized)?;
        platform.swap_buffers(window, context, Self::CLEAR_COLOR)
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_live()
    }

    pub fn surface(&self) -> &SurfaceState<W, C> {
        &self.surface
    }

    pub fn window(&self) -> Option<&W> {
        self.surface.window()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.surface.context_mut()
    }

    pub fn geometry(&self) -> Option<&ScreenGeometry> {
        self.geometry.as_ref()
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Window, context, geometry and projection borrowed together for a frame.
    pub fn frame_parts(&mut self) -> Option<(&W, &mut C, &ScreenGeometry, &Projection)> {
        let (window, context) = self.surface.parts_mut()?;
        Some((window, context, self.geometry.as_ref()?, self.projection.as_ref()?))
    }

    // ── queries ─────────────────────────────────────────────────────────────

    pub fn window_width(&self) -> u32 {
        self.query(ScreenGeometry::window_width)
    }

    pub fn window_height(&self) -> u32 {
        self.query(ScreenGeometry::window_height)
    }

    pub fn screen_width(&self) -> u32 {
        self.query(ScreenGeometry::screen_width)
    }

    pub fn screen_height(&self) -> u32 {
        self.query(ScreenGeometry::screen_height)
    }

    pub fn screen_offset_x(&self) -> i32 {
        self.query(ScreenGeometry::screen_offset_x)
    }

    pub fn screen_offset_y(&self) -> i32 {
        self.query(ScreenGeometry::screen_offset_y)
    }

    pub fn unrotated_screen_width(&self) -> u32 {
        self.query(ScreenGeometry::unrotated_width)
    }

    pub fn unrotated_screen_height(&self) -> u32 {
        self.query(ScreenGeometry::unrotated_height)
    }

    pub fn screen_rotate(&self) -> u32 {
        self.query(ScreenGeometry::rotate_steps)
    }

    pub fn rotation(&self) -> Rotation {
        self.query(ScreenGeometry::rotation)
    }

    fn query<T: Default>(&self, f: impl FnOnce(&ScreenGeometry) -> T) -> T {
        self.geometry.as_ref().map(f).unwrap_or_default()
    }
}
