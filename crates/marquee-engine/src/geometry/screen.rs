use crate::config::DisplayConfig;

use super::Rotation;

/// Effective screen geometry for one initialization.
///
/// Window and screen dimensions are reported in the rotated frame: for 90° and
/// 270° they are swapped relative to the physical window. The unrotated screen
/// size is kept alongside because the viewport is always laid out unrotated.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScreenGeometry {
    window_width: u32,
    window_height: u32,
    screen_width: u32,
    screen_height: u32,
    screen_offset_x: i32,
    screen_offset_y: i32,
    unrotated_width: u32,
    unrotated_height: u32,
    rotation: Rotation,
}

/// Derives the screen geometry from the configuration and the window size
/// the platform actually produced.
///
/// The function is pure: calling it again with the same inputs yields the
/// same geometry, so axes are never swapped twice.
pub fn resolve_geometry(config: &DisplayConfig, achieved_window: (u32, u32)) -> ScreenGeometry {
    let (mut window_width, mut window_height) = achieved_window;
    let mut screen_width = config.screen_width.unwrap_or(window_width);
    let mut screen_height = config.screen_height.unwrap_or(window_height);

    let unrotated_width = screen_width;
    let unrotated_height = screen_height;

    if config.rotation.swaps_axes() {
        std::mem::swap(&mut screen_width, &mut screen_height);
        std::mem::swap(&mut window_width, &mut window_height);
    }

    ScreenGeometry {
        window_width,
        window_height,
        screen_width,
        screen_height,
        screen_offset_x: config.screen_offset_x,
        screen_offset_y: config.screen_offset_y,
        unrotated_width,
        unrotated_height,
        rotation: config.rotation,
    }
}

impl ScreenGeometry {
    #[inline]
    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    #[inline]
    pub fn window_height(&self) -> u32 {
        self.window_height
    }

    #[inline]
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    #[inline]
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    #[inline]
    pub fn screen_offset_x(&self) -> i32 {
        self.screen_offset_x
    }

    #[inline]
    pub fn screen_offset_y(&self) -> i32 {
        self.screen_offset_y
    }

    #[inline]
    pub fn unrotated_width(&self) -> u32 {
        self.unrotated_width
    }

    #[inline]
    pub fn unrotated_height(&self) -> u32 {
        self.unrotated_height
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn rotate_steps(&self) -> u32 {
        self.rotation.steps()
    }

    /// Window size as the platform sees it, undoing the rotation swap.
    pub fn physical_window_size(&self) -> (u32, u32) {
        if self.rotation.swaps_axes() {
            (self.window_height, self.window_width)
        } else {
            (self.window_width, self.window_height)
        }
    }
}
