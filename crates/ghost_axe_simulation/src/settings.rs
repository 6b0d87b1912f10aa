//! Persisted settings (`config/settings.json`)
//!
//! Загружаются при старте, сохраняются при выходе. Ядро симуляции читает
//! только `input_mode` (схема управления) и чувствительность для mouse look.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Схема управления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Клавиатура + мышь (WASD strafe, mouse look, LMB swing)
    #[default]
    #[serde(rename = "mouse", alias = "direct")]
    Direct,
    /// Акселерометр: жест face down = swing, A/D = поворот камеры
    #[serde(rename = "microbit", alias = "gesture")]
    Gesture,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "sensitivityX")]
    pub sensitivity_x: f32,
    #[serde(rename = "sensitivityY")]
    pub sensitivity_y: f32,
    #[serde(rename = "input")]
    pub input_mode: InputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity_x: 50.0,
            sensitivity_y: 50.0,
            input_mode: InputMode::Direct,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ArenaError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ArenaError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArenaError> {
        let path = path.as_ref();
        let raw = serde_json::to_string(self).map_err(|source| ArenaError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, raw).map_err(|source| ArenaError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Частичное обновление (меню настроек): `None` = не трогать поле.
    pub fn update(
        &mut self,
        sensitivity_x: Option<f32>,
        sensitivity_y: Option<f32>,
        input_mode: Option<InputMode>,
    ) {
        if let Some(x) = sensitivity_x {
            self.sensitivity_x = x;
        }
        if let Some(y) = sensitivity_y {
            self.sensitivity_y = y;
        }
        if let Some(mode) = input_mode {
            self.input_mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_keys() {
        let raw = r#"{"input": "microbit", "sensitivityX": 40.5, "sensitivityY": 20}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();

        assert_eq!(settings.input_mode, InputMode::Gesture);
        assert_eq!(settings.sensitivity_x, 40.5);
        assert_eq!(settings.sensitivity_y, 20.0);
    }

    #[test]
    fn test_input_mode_aliases() {
        let direct: InputMode = serde_json::from_str(r#""direct""#).unwrap();
        let gesture: InputMode = serde_json::from_str(r#""gesture""#).unwrap();
        assert_eq!(direct, InputMode::Direct);
        assert_eq!(gesture, InputMode::Gesture);

        // Сохраняем всегда в legacy формате
        assert_eq!(serde_json::to_string(&InputMode::Direct).unwrap(), r#""mouse""#);
    }

    #[test]
    fn test_partial_update() {
        let mut settings = Settings::default();
        settings.update(None, Some(12.0), Some(InputMode::Gesture));

        assert_eq!(settings.sensitivity_x, 50.0);
        assert_eq!(settings.sensitivity_y, 12.0);
        assert_eq!(settings.input_mode, InputMode::Gesture);
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!(
            "ghost_axe_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            sensitivity_x: 33.0,
            sensitivity_y: 44.0,
            input_mode: InputMode::Gesture,
        };

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, ArenaError::SettingsIo { .. }));
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let path = std::env::temp_dir().join(format!(
            "ghost_axe_bad_settings_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ArenaError::SettingsFormat { .. }));
    }
}
