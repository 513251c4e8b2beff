//! Setting keys consumed by the engine and their defaults.

use super::SettingValue;

pub const WINDOWED: &str = "Windowed";
pub const VSYNC: &str = "VSync";
pub const WINDOW_WIDTH: &str = "WindowWidth";
pub const WINDOW_HEIGHT: &str = "WindowHeight";
pub const SCREEN_WIDTH: &str = "ScreenWidth";
pub const SCREEN_HEIGHT: &str = "ScreenHeight";
pub const SCREEN_OFFSET_X: &str = "ScreenOffsetX";
pub const SCREEN_OFFSET_Y: &str = "ScreenOffsetY";
pub const ROTATE: &str = "Rotate";

pub const OMX_AUDIO_DEV: &str = "OMXAudioDev";
pub const VIDEO_AUDIO: &str = "VideoAudio";
pub const STRETCH_VIDEO_ON_SCREENSAVER: &str = "StretchVideoOnScreenSaver";
pub const SCREENSAVER_GAME_INFO: &str = "ScreenSaverGameInfo";

/// Every key with a built-in default, in persistence order.
pub const ALL: &[&str] = &[
    WINDOWED,
    VSYNC,
    WINDOW_WIDTH,
    WINDOW_HEIGHT,
    SCREEN_WIDTH,
    SCREEN_HEIGHT,
    SCREEN_OFFSET_X,
    SCREEN_OFFSET_Y,
    ROTATE,
    OMX_AUDIO_DEV,
    VIDEO_AUDIO,
    STRETCH_VIDEO_ON_SCREENSAVER,
    SCREENSAVER_GAME_INFO,
];

/// Built-in default for `key`, if the engine knows the key.
pub fn default_value(key: &str) -> Option<SettingValue> {
    let value = match key {
        WINDOWED => SettingValue::Bool(false),
        VSYNC => SettingValue::Bool(true),
        WINDOW_WIDTH | WINDOW_HEIGHT | SCREEN_WIDTH | SCREEN_HEIGHT => SettingValue::Int(0),
        SCREEN_OFFSET_X | SCREEN_OFFSET_Y | ROTATE => SettingValue::Int(0),
        OMX_AUDIO_DEV => SettingValue::Str("both".to_string()),
        VIDEO_AUDIO => SettingValue::Bool(true),
        STRETCH_VIDEO_ON_SCREENSAVER => SettingValue::Bool(false),
        SCREENSAVER_GAME_INFO => SettingValue::Str("never".to_string()),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_key_has_a_default() {
        for key in ALL {
            assert!(default_value(key).is_some(), "missing default for {key}");
        }
    }

    #[test]
    fn unknown_key_has_no_default() {
        assert!(default_value("ThemeSet").is_none());
    }
}
