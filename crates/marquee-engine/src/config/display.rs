use crate::geometry::{OffsetPolicy, Rotation};
use crate::settings::{keys, Settings};

/// Read-only display configuration.
///
/// Sizes are `None` when the setting is absent or not positive; the surface
/// manager then falls back to the native display mode (window) or the window
/// size (screen).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DisplayConfig {
    pub windowed: bool,
    pub vsync: bool,

    pub window_width: Option<u32>,
    pub window_height: Option<u32>,

    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,

    pub screen_offset_x: i32,
    pub screen_offset_y: i32,

    pub rotation: Rotation,

    /// How `screen_offset_*` affect the viewport.
    pub offset_policy: OffsetPolicy,
}

impl DisplayConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            windowed: settings.get_bool(keys::WINDOWED),
            vsync: settings.get_bool(keys::VSYNC),
            window_width: positive(settings.get_int(keys::WINDOW_WIDTH)),
            window_height: positive(settings.get_int(keys::WINDOW_HEIGHT)),
            screen_width: positive(settings.get_int(keys::SCREEN_WIDTH)),
            screen_height: positive(settings.get_int(keys::SCREEN_HEIGHT)),
            screen_offset_x: offset(settings.get_int(keys::SCREEN_OFFSET_X)),
            screen_offset_y: offset(settings.get_int(keys::SCREEN_OFFSET_Y)),
            rotation: Rotation::from_setting(settings.get_int(keys::ROTATE)),
            offset_policy: OffsetPolicy::default(),
        }
    }

    pub fn with_offset_policy(mut self, policy: OffsetPolicy) -> Self {
        self.offset_policy = policy;
        self
    }
}

fn positive(v: i64) -> Option<u32> {
    u32::try_from(v).ok().filter(|v| *v > 0)
}

fn offset(v: i64) -> i32 {
    i32::try_from(v).unwrap_or_else(|_| {
        log::warn!("screen offset {v} out of range; clamping");
        v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    })
}
