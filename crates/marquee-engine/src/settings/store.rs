use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::keys;

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl SettingValue {
    fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Str(_) => "string",
        }
    }
}

/// Flat key/value settings.
///
/// Lookups fall back to [`keys::default_value`] when a key is absent or holds a
/// value of the wrong type. Keys the engine does not know are kept as-is so a
/// load/save cycle never drops other subsystems' settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl Settings {
    /// Empty store; every getter returns the built-in default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with every built-in default.
    pub fn with_defaults() -> Self {
        let values = keys::ALL
            .iter()
            .filter_map(|k| keys::default_value(k).map(|v| (k.to_string(), v)))
            .collect();
        Self { values }
    }

    /// Loads settings from a JSON file.
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("settings file {} not found, using defaults", path.display());
            return Ok(Self::new());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;

        log::debug!("loaded {} settings from {}", settings.len(), path.display());
        Ok(settings)
    }

    /// Writes the settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, text)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), SettingValue::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), SettingValue::Int(value));
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), SettingValue::Str(value.into()));
    }

    pub fn get_bool(&self, key: &str) -> bool {
        match self.lookup(key, "bool") {
            Some(SettingValue::Bool(v)) => v,
            _ => false,
        }
    }

    pub fn get_int(&self, key: &str) -> i64 {
        match self.lookup(key, "int") {
            Some(SettingValue::Int(v)) => v,
            _ => 0,
        }
    }

    pub fn get_string(&self, key: &str) -> String {
        match self.lookup(key, "string") {
            Some(SettingValue::Str(v)) => v,
            _ => String::new(),
        }
    }

    /// Stored value if it has the expected type, otherwise the default.
    fn lookup(&self, key: &str, expected: &str) -> Option<SettingValue> {
        match self.values.get(key) {
            Some(v) if v.type_name() == expected => Some(v.clone()),
            Some(v) => {
                log::warn!(
                    "setting {key} holds a {} value, expected {expected}; using default",
                    v.type_name()
                );
                keys::default_value(key)
            }
            None => keys::default_value(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s = Settings::new();
        assert!(!s.get_bool(keys::WINDOWED));
        assert!(s.get_bool(keys::VSYNC));
        assert_eq!(s.get_int(keys::ROTATE), 0);
        assert_eq!(s.get_string(keys::OMX_AUDIO_DEV), "both");
    }

    #[test]
    fn unknown_key_without_default_is_zero_value() {
        let s = Settings::new();
        assert!(!s.get_bool("ShowHelpPrompts"));
        assert_eq!(s.get_int("MaxVRAM"), 0);
        assert_eq!(s.get_string("ThemeSet"), "");
    }

    #[test]
    fn wrong_type_uses_default() {
        let mut s = Settings::new();
        s.set_string(keys::VSYNC, "yes");
        assert!(s.get_bool(keys::VSYNC));
    }

    #[test]
    fn parses_flat_json_object() {
        let text = r#"{ "Windowed": true, "Rotate": 3, "OMXAudioDev": "alsa:hw:0,0", "ThemeSet": "carbon" }"#;
        let s: Settings = serde_json::from_str(text).unwrap();

        assert!(s.get_bool(keys::WINDOWED));
        assert_eq!(s.get_int(keys::ROTATE), 3);
        assert_eq!(s.get_string(keys::OMX_AUDIO_DEV), "alsa:hw:0,0");
        assert_eq!(s.get("ThemeSet"), Some(&SettingValue::Str("carbon".into())));
    }

    #[test]
    fn save_then_load_preserves_unknown_keys() {
        let dir = std::env::temp_dir().join(format!("marquee-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let mut s = Settings::with_defaults();
        s.set_int(keys::SCREEN_OFFSET_X, -12);
        s.set_string("ThemeSet", "carbon");
        s.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, s);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("marquee-does-not-exist/settings.json");
        let s = Settings::load(&path).unwrap();
        assert!(s.is_empty());
        assert!(s.get_bool(keys::VSYNC));
    }

    #[test]
    fn load_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("marquee-bad-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse settings file"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
