use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MAX_PHYSICS_STEPS, DEFAULT_PHYSICS_HZ, MAX_PIXEL_RATIO};
use crate::error::{ColorParseError, ConfigError};
use crate::math::Color;

fn default_title() -> String {
    "scene-loop".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical pixels
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: default_title(), width: 800, height: 600 }
    }
}

/// Runtime settings read from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub max_pixel_ratio: f32,
    /// CSS hex, e.g. "#000000"
    pub clear_color: String,
    /// 0 is fully transparent
    pub clear_alpha: f32,
    pub physics_hz: f32,
    pub max_physics_steps: u8,
    pub show_panel: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            max_pixel_ratio: MAX_PIXEL_RATIO,
            clear_color: "#000000".to_string(),
            clear_alpha: 0.0,
            physics_hz: DEFAULT_PHYSICS_HZ,
            max_physics_steps: DEFAULT_MAX_PHYSICS_STEPS,
            show_panel: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.clear_color()?;
        info!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn clear_color(&self) -> Result<Color, ColorParseError> {
        Color::parse(&self.clear_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_pixel_ratio, 2.0);
        assert_eq!(config.physics_hz, 60.0);
        assert_eq!(config.max_physics_steps, 4);
        assert_eq!(config.clear_color().unwrap(), Color::BLACK);
    }

    #[test]
    fn partial_window_keeps_other_defaults() {
        let config = AppConfig::from_json(r#"{ "window": { "width": 1024 }, "show_panel": false }"#).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "scene-loop");
        assert!(!config.show_panel);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load("/no/such/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_rejects_bad_color() {
        let path = std::env::temp_dir().join(format!("scene-loop-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r##"{{ "clear_color": "#zzz" }}"##).unwrap();
        drop(file);

        let err = AppConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Color(_)));
    }

    #[test]
    fn load_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("scene-loop-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
