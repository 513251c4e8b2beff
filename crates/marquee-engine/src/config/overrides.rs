use crate::settings::{keys, Settings};

/// Command-line display overrides.
///
/// Every field left as `None` keeps whatever the settings file says.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayOverrides {
    pub window_size: Option<(u32, u32)>,
    pub screen_size: Option<(u32, u32)>,
    pub screen_offset: Option<(i32, i32)>,
    pub rotate: Option<i64>,
    pub windowed: Option<bool>,
    pub vsync: Option<bool>,
}

impl DisplayOverrides {
    /// Writes the overrides into `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some((w, h)) = self.window_size {
            settings.set_int(keys::WINDOW_WIDTH, w as i64);
            settings.set_int(keys::WINDOW_HEIGHT, h as i64);
        }
        if let Some((w, h)) = self.screen_size {
            settings.set_int(keys::SCREEN_WIDTH, w as i64);
            settings.set_int(keys::SCREEN_HEIGHT, h as i64);
        }
        if let Some((x, y)) = self.screen_offset {
            settings.set_int(keys::SCREEN_OFFSET_X, x as i64);
            settings.set_int(keys::SCREEN_OFFSET_Y, y as i64);
        }
        if let Some(rotate) = self.rotate {
            settings.set_int(keys::ROTATE, rotate);
        }
        if let Some(windowed) = self.windowed {
            settings.set_bool(keys::WINDOWED, windowed);
        }
        if let Some(vsync) = self.vsync {
            settings.set_bool(keys::VSYNC, vsync);
        }
    }
}
