use crate::config::DisplayConfig;
use crate::device::DisplayError;

/// Window size requested from the platform before the window is created.
///
/// Explicit configuration wins; otherwise the native display mode is used.
/// Screen size and offsets are resolved later against the achieved window,
/// see [`resolve_geometry`](super::resolve_geometry).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayLayout {
    pub window_width: u32,
    pub window_height: u32,
}

impl DisplayLayout {
    /// Resolves the layout against the platform's native resolution.
    ///
    /// Fails only when a window dimension is unset and the platform reports no
    /// display mode to fall back to.
    pub fn resolve(
        config: &DisplayConfig,
        native_resolution: Option<(u32, u32)>,
    ) -> Result<Self, DisplayError> {
        let native = || {
            native_resolution.ok_or_else(|| {
                DisplayError::PlatformInit("no native display mode reported".to_string())
            })
        };

        let window_width = match config.window_width {
            Some(w) => w,
            None => native()?.0,
        };
        let window_height = match config.window_height {
            Some(h) => h,
            None => native()?.1,
        };

        Ok(Self {
            window_width,
            window_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_window_uses_native_resolution() {
        let layout = DisplayLayout::resolve(&DisplayConfig::default(), Some((1920, 1080))).unwrap();
        assert_eq!((layout.window_width, layout.window_height), (1920, 1080));
    }

    #[test]
    fn explicit_window_wins_over_native() {
        let config = DisplayConfig {
            window_width: Some(800),
            window_height: Some(600),
            ..Default::default()
        };
        let layout = DisplayLayout::resolve(&config, Some((1920, 1080))).unwrap();
        assert_eq!((layout.window_width, layout.window_height), (800, 600));
    }

    #[test]
    fn partial_window_size_mixes_sources() {
        let config = DisplayConfig {
            window_width: Some(1024),
            ..Default::default()
        };
        let layout = DisplayLayout::resolve(&config, Some((1920, 1080))).unwrap();
        assert_eq!((layout.window_width, layout.window_height), (1024, 1080));
    }

    #[test]
    fn explicit_sizes_do_not_need_a_display_mode() {
        let config = DisplayConfig {
            window_width: Some(640),
            window_height: Some(480),
            screen_width: Some(320),
            ..Default::default()
        };
        let layout = DisplayLayout::resolve(&config, None).unwrap();
        assert_eq!((layout.window_width, layout.window_height), (640, 480));
    }

    #[test]
    fn missing_display_mode_is_platform_error() {
        let err = DisplayLayout::resolve(&DisplayConfig::default(), None).unwrap_err();
        assert!(matches!(err, DisplayError::PlatformInit(_)));
    }
}
