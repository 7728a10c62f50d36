//! Configuration for GlassText
//!
//! Settings come from an optional `config.json` in the platform config
//! directory. Every field has a default, so a partial file only overrides
//! what it names. The file is read once at startup and never written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::{ShortcutError, Shortcuts};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid shortcut: {0}")]
    Shortcut(#[from] ShortcutError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub always_on_top: bool,
    /// Presses at or above this window-local y start a drag.
    pub title_bar_height: f32,
    pub outer_margin: f32,
    pub spacing: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            always_on_top: true,
            title_bar_height: 30.0,
            outer_margin: 15.0,
            spacing: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub font_size: f32,
    pub padding: f32,
    pub gutter_padding: f32,
    pub gutter_right_inset: f32,
    /// Spaces inserted for Tab. 0 keeps the tab character.
    pub tab_spaces: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            padding: 10.0,
            gutter_padding: crate::gutter::DEFAULT_BASE_PADDING,
            gutter_right_inset: crate::gutter::DEFAULT_RIGHT_INSET,
            tab_spaces: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub toggle_visibility: String,
    pub close: String,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            toggle_visibility: "Ctrl+M".into(),
            close: "Escape".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    pub background_blur: bool,
    pub exclude_from_capture: bool,
    pub hide_from_switcher: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            background_blur: true,
            exclude_from_capture: true,
            hide_from_switcher: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassConfig {
    pub window: WindowConfig,
    pub editor: EditorConfig,
    pub shortcuts: ShortcutConfig,
    pub privacy: PrivacyConfig,
}

impl GlassConfig {
    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.shortcuts()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path("glasstext");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Parsed keyboard shortcuts.
    pub fn shortcuts(&self) -> std::result::Result<Shortcuts, ShortcutError> {
        Shortcuts::parse(&self.shortcuts.toggle_visibility, &self.shortcuts.close)
    }
}

/// Config directory for GlassText
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_path(app_name: &str) -> PathBuf {
    config_dir(app_name).join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GlassConfig::default();
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.window.title_bar_height, 30.0);
        assert_eq!(config.editor.gutter_padding, 10.0);
        assert_eq!(config.editor.gutter_right_inset, 5.0);
        assert_eq!(config.shortcuts.toggle_visibility, "Ctrl+M");
        assert!(config.privacy.exclude_from_capture);
        assert!(config.shortcuts().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GlassConfig =
            serde_json::from_str(r#"{ "window": { "width": 640 }, "privacy": { "hide_from_switcher": false } }"#)
                .unwrap();
        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.window.height, 600.0);
        assert!(!config.privacy.hide_from_switcher);
        assert!(config.privacy.background_blur);
        assert_eq!(config.editor, EditorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "editor": {{ "font_size": 18 }}, "shortcuts": {{ "close": "Ctrl+Q" }} }}"#).unwrap();
        let config = GlassConfig::load_from(file.path()).unwrap();
        assert_eq!(config.editor.font_size, 18.0);
        assert_eq!(config.shortcuts.close, "Ctrl+Q");
    }

    #[test]
    fn test_load_rejects_bad_shortcut() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "shortcuts": {{ "toggle_visibility": "Ctrl+Banana" }} }}"#).unwrap();
        let err = GlassConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Shortcut(_)));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(GlassConfig::load_from(file.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GlassConfig::load_from(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        assert!(config_path("glasstext").ends_with("config.json"));
    }
}
