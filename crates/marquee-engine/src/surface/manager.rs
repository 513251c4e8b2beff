use std::fmt;

use crate::config::DisplayConfig;
use crate::device::{DisplayError, FramebufferHints, SwapInterval};
use crate::geometry::DisplayLayout;

use super::{decode_icon, Platform, WindowRequest, EMBEDDED_ICON_PNG};

/// Non-fatal problems met while creating the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceWarning {
    /// The window icon could not be decoded or applied.
    IconLoad(String),
    /// Neither synchronized nor late-tearing swaps were accepted.
    VSyncUnavailable(String),
}

impl fmt::Display for SurfaceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceWarning::IconLoad(msg) => write!(f, "failed to set window icon: {msg}"),
            SurfaceWarning::VSyncUnavailable(msg) => {
                write!(f, "tried to enable vsync, but failed: {msg}")
            }
        }
    }
}

/// Surface creation parameters that do not come from the settings store.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub title: String,
    pub hints: FramebufferHints,
    /// PNG bytes for the window icon; `None` leaves the platform default.
    pub icon_png: Option<&'static [u8]>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            title: "Marquee".to_string(),
            hints: FramebufferHints::default(),
            icon_png: Some(EMBEDDED_ICON_PNG),
        }
    }
}

// Field order matters: the context is dropped before the window it renders to.
struct LiveSurface<W, C> {
    context: C,
    window: W,
}

/// Window + graphics context pair.
///
/// Either both handles are live or neither is; there is no partially created
/// state. The cursor visibility seen before creation is kept so teardown can
/// restore it.
pub struct SurfaceState<W, C> {
    live: Option<LiveSurface<W, C>>,
    initial_cursor_visible: bool,
    layout: Option<DisplayLayout>,
    warnings: Vec<SurfaceWarning>,
}

impl<W, C> Default for SurfaceState<W, C> {
    fn default() -> Self {
        Self {
            live: None,
            initial_cursor_visible: true,
            layout: None,
            warnings: Vec::new(),
        }
    }
}

impl<W, C> SurfaceState<W, C> {
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn window(&self) -> Option<&W> {
        self.live.as_ref().map(|l| &l.window)
    }

    pub fn context(&self) -> Option<&C> {
        self.live.as_ref().map(|l| &l.context)
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.live.as_mut().map(|l| &mut l.context)
    }

    /// Window and context borrowed together.
    pub fn parts_mut(&mut self) -> Option<(&W, &mut C)> {
        self.live.as_mut().map(|l| (&l.window, &mut l.context))
    }

    pub fn initial_cursor_visible(&self) -> bool {
        self.initial_cursor_visible
    }

    /// Sizes requested from the platform at creation.
    pub fn layout(&self) -> Option<&DisplayLayout> {
        self.layout.as_ref()
    }

    pub fn warnings(&self) -> &[SurfaceWarning] {
        &self.warnings
    }
}

/// Creates the window and its graphics context.
///
/// On failure everything acquired so far is released, the cursor is restored
/// and the windowing subsystem is shut down again.
pub fn create_surface<P: Platform>(
    platform: &mut P,
    config: &DisplayConfig,
    options: &SurfaceOptions,
) -> Result<SurfaceState<P::Window, P::Context>, DisplayError> {
    log::info!("creating surface...");

    platform.init()?;

    // Hide the pointer early, before the window shows up.
    let initial_cursor_visible = platform.show_cursor(false);

    let layout = match DisplayLayout::resolve(config, platform.native_resolution()) {
        Ok(layout) => layout,
        Err(err) => return Err(abort(platform, initial_cursor_visible, err)),
    };

    let request = WindowRequest {
        title: options.title.clone(),
        width: layout.window_width,
        height: layout.window_height,
        fullscreen: !config.windowed,
    };

    let window = match platform.create_window(&request) {
        Ok(window) => window,
        Err(err) => return Err(abort(platform, initial_cursor_visible, err)),
    };

    log::info!(
        "created window successfully ({}x{}, {})",
        request.width,
        request.height,
        if request.fullscreen { "fullscreen" } else { "windowed" }
    );

    let mut warnings = Vec::new();

    if let Some(png) = options.icon_png {
        let applied = decode_icon(png)
            .map_err(|e| format!("{e:#}"))
            .and_then(|icon| platform.set_window_icon(&window, icon));
        if let Err(msg) = applied {
            warnings.push(SurfaceWarning::IconLoad(msg));
        }
    }

    let mut context = match platform.create_context(&window, &options.hints) {
        Ok(context) => context,
        Err(err) => {
            platform.destroy_window(window);
            return Err(abort(platform, initial_cursor_visible, err));
        }
    };

    if let Some(warning) = apply_vsync(platform, &mut context, config.vsync) {
        warnings.push(warning);
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }

    Ok(SurfaceState {
        live: Some(LiveSurface { context, window }),
        initial_cursor_visible,
        layout: Some(layout),
        warnings,
    })
}

/// Releases the context and window, restores the cursor and shuts the
/// windowing subsystem down. A state without a live surface is left untouched.
pub fn destroy_surface<P: Platform>(
    platform: &mut P,
    state: &mut SurfaceState<P::Window, P::Context>,
) {
    let Some(LiveSurface { context, window }) = state.live.take() else {
        log::debug!("destroy_surface: no live surface");
        return;
    };

    platform.destroy_context(context);
    platform.destroy_window(window);

    platform.show_cursor(state.initial_cursor_visible);
    platform.shutdown();

    log::info!("surface destroyed");
}

fn abort<P: Platform>(platform: &mut P, cursor_visible: bool, err: DisplayError) -> DisplayError {
    log::error!("{err}");
    platform.show_cursor(cursor_visible);
    platform.shutdown();
    err
}

/// Synchronized swaps first, late swap tearing second; without vsync the
/// immediate mode is requested and a refusal is ignored.
fn apply_vsync<P: Platform>(
    platform: &mut P,
    context: &mut P::Context,
    enabled: bool,
) -> Option<SurfaceWarning> {
    if !enabled {
        if let Err(msg) = platform.set_swap_interval(context, SwapInterval::Immediate) {
            log::debug!("immediate swap refused: {msg}");
        }
        return None;
    }

    let sync_err = match platform.set_swap_interval(context, SwapInterval::Synchronized) {
        Ok(()) => return None,
        Err(msg) => msg,
    };

    match platform.set_swap_interval(context, SwapInterval::LateSwapTearing) {
        Ok(()) => {
            log::info!("synchronized swap refused ({sync_err}); using late swap tearing");
            None
        }
        Err(msg) => Some(SurfaceWarning::VSyncUnavailable(msg)),
    }
}
