// Console settings: window, font bitmap and grid size.
// Stored in the platform config dir, e.g. ~/.config/tessera/settings.json on
// Linux or ~/Library/Application Support/tessera/settings.json on macOS.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessera_core::Color;
use tessera_renderer::ResizeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Fullscreen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Font bitmap: 16 glyphs per row, glyph 0 at the top-left.
    pub bitmap_file: String,
    /// Grid size in cells.
    pub width: usize,
    pub height: usize,
    /// Glyph size in bitmap pixels.
    pub char_width: u32,
    pub char_height: u32,
    pub scale: f32,
    pub title: String,
    pub resize_mode: ResizeMode,
    pub window_state: WindowState,
    pub clear_color: Color,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            bitmap_file: "terminal8x8.png".to_string(),
            width: 80,
            height: 25,
            char_width: 8,
            char_height: 8,
            scale: 1.0,
            title: "Tessera".to_string(),
            resize_mode: ResizeMode::None,
            window_state: WindowState::Normal,
            clear_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("bitmap_file must not be empty")]
    EmptyBitmapFile,
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("grid must be at least 1x1 (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("glyph size must be at least 1x1 (got {width}x{height})")]
    InvalidCharSize { width: u32, height: u32 },
    #[error("scale must be a positive finite number (got {0})")]
    InvalidScale(f32),
}

impl ConsoleSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bitmap_file.trim().is_empty() {
            return Err(SettingsError::EmptyBitmapFile);
        }
        if self.title.trim().is_empty() {
            return Err(SettingsError::EmptyTitle);
        }
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.char_width == 0 || self.char_height == 0 {
            return Err(SettingsError::InvalidCharSize {
                width: self.char_width,
                height: self.char_height,
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(SettingsError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Window size in pixels that fits the grid exactly at `scale`.
    pub fn window_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.char_width as f32 * self.scale) as u32,
            (self.height as f32 * self.char_height as f32 * self.scale) as u32,
        )
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("tessera").join("settings.json"))
}

pub fn load_settings() -> ConsoleSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => ConsoleSettings::default(),
    }
}

/// Read settings from `path`. A missing file gives the defaults; an
/// unreadable one is logged and also gives the defaults.
pub fn load_settings_from(path: &Path) -> ConsoleSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                ConsoleSettings::default()
            }
        },
        Err(_) => ConsoleSettings::default(),
    }
}

pub fn save_settings(settings: &ConsoleSettings) {
    let Some(path) = settings_path() else {
        log::warn!("Cannot determine settings path");
        return;
    };
    save_settings_to(settings, &path);
}

pub fn save_settings_to(settings: &ConsoleSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ConsoleSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.window_size(), (640, 200));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = ConsoleSettings::default();

        let s = ConsoleSettings {
            bitmap_file: " ".into(),
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::EmptyBitmapFile));

        let s = ConsoleSettings {
            title: String::new(),
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::EmptyTitle));

        let s = ConsoleSettings {
            height: 0,
            ..base.clone()
        };
        assert_eq!(
            s.validate(),
            Err(SettingsError::InvalidDimensions { width: 80, height: 0 })
        );

        let s = ConsoleSettings {
            char_width: 0,
            ..base.clone()
        };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidCharSize { .. })));

        let s = ConsoleSettings { scale: -1.0, ..base };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidScale(_))));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: ConsoleSettings =
            serde_json::from_str(r#"{"width": 40, "resize_mode": "resize_scale"}"#).unwrap();
        assert_eq!(settings.width, 40);
        assert_eq!(settings.height, 25);
        assert_eq!(settings.resize_mode, ResizeMode::ResizeScale);
        assert_eq!(settings.window_state, WindowState::Normal);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = ConsoleSettings {
            title: "Dungeon".into(),
            clear_color: Color::BLUE,
            window_state: WindowState::Fullscreen,
            ..Default::default()
        };
        save_settings_to(&settings, &path);
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path), ConsoleSettings::default());

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), ConsoleSettings::default());
    }
}
