use std::path::PathBuf;

use eframe::egui;
use serde::{Deserialize, Serialize};

use warpgrid::colors::ColorScheme;
use warpgrid::config::SceneConfig;
use warpgrid::shapes::ShapeKind;

use crate::WarpApp;

/// Directory holding settings and saved scenes: `~/.config/warpgrid/`
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("warpgrid");
    path
}

/// Returns the path to the settings file: `~/.config/warpgrid/settings.json`
fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Scene
    #[serde(flatten)]
    pub scene: SceneConfig,

    // Look
    pub color_scheme: ColorScheme,
    pub shape: ShapeKind,
    pub shape_scale: f32,
    pub color_animation: bool,
    pub show_border: bool,

    // Playback
    pub animation_speed: f32,
    pub follow_window: bool,

    // Editor
    pub show_settings: bool,

    // Color (stored as u8 triples since Color32 isn't serde-friendly)
    pub color_r: u8,
    pub color_g: u8,
    pub color_b: u8,
    pub background_r: u8,
    pub background_g: u8,
    pub background_b: u8,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),

            color_scheme: ColorScheme::Monochrome,
            shape: ShapeKind::Square,
            shape_scale: 0.8,
            color_animation: false,
            show_border: false,

            animation_speed: 1.2,
            follow_window: true,

            show_settings: true,

            color_r: 255,
            color_g: 255,
            color_b: 255,
            background_r: 10,
            background_g: 10,
            background_b: 20,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Extract current settings from the running application.
    pub fn from_app(app: &WarpApp) -> Self {
        let background = app.canvas.settings.background;
        Self {
            scene: app.scene(),

            color_scheme: app.color_scheme,
            shape: app.shape,
            shape_scale: app.canvas.settings.shape_scale,
            color_animation: app.color_animation,
            show_border: app.canvas.settings.show_border,

            animation_speed: app.animation_speed,
            follow_window: app.follow_window,

            show_settings: app.show_settings,

            color_r: app.base_color[0],
            color_g: app.base_color[1],
            color_b: app.base_color[2],
            background_r: background.r(),
            background_g: background.g(),
            background_b: background.b(),
        }
    }

    /// Apply loaded settings to the running application.
    ///
    /// The grid itself is built from `scene` by the caller.
    pub fn apply(&self, app: &mut WarpApp) {
        app.color_scheme = self.color_scheme;
        app.shape = self.shape;
        app.canvas.settings.shape_scale = self.shape_scale;
        app.color_animation = self.color_animation;
        app.canvas.settings.show_border = self.show_border;

        app.animation_speed = self.animation_speed;
        app.follow_window = self.follow_window;

        app.show_settings = self.show_settings;

        app.base_color = [self.color_r, self.color_g, self.color_b];
        app.canvas.settings.background =
            egui::Color32::from_rgb(self.background_r, self.background_g, self.background_b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpgrid::distortions::DistortionKind;

    #[test]
    fn test_scene_fields_are_flat() {
        let mut settings = AppSettings::default();
        settings.scene.distortion_type = DistortionKind::Tornado;
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"distortion_type\":\"tornado\""));
        assert!(!json.contains("\"scene\""));

        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scene.distortion_type, DistortionKind::Tornado);
    }

    #[test]
    fn test_old_files_still_load() {
        let settings: AppSettings = serde_json::from_str(r#"{ "dimension": 20, "shape": "star" }"#).unwrap();
        assert_eq!(settings.scene.dimension, 20);
        assert_eq!(settings.shape, ShapeKind::Star);
        assert_eq!(settings.color_scheme, ColorScheme::Monochrome);
        assert!((settings.animation_speed - 1.2).abs() < 1e-6);
        assert!(!settings.show_border);
    }

    #[test]
    fn test_new_schemes_and_shapes_persist() {
        let mut settings = AppSettings::default();
        settings.color_scheme = ColorScheme::Vaporwave;
        settings.shape = ShapeKind::KochSnowflake;
        settings.show_border = true;
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.color_scheme, ColorScheme::Vaporwave);
        assert_eq!(back.shape, ShapeKind::KochSnowflake);
        assert!(back.show_border);
    }
}
