//! Game configuration (window, look, weapon toggles). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FOV_MIN: f32 = 65.0;
pub const FOV_MAX: f32 = 120.0;
pub const SENSITIVITY_MIN: f32 = 0.5;
pub const SENSITIVITY_MAX: f32 = 10.0;
pub const SENSITIVITY_STEP: f32 = 0.1;

/// Radians of look per mouse count at sensitivity 1.0.
const LOOK_SCALE_PER_SENSITIVITY: f32 = 0.001;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    fov: f32,
    /// Mouse sensitivity multiplier.
    #[serde(default = "default_sensitivity")]
    sensitivity: f32,
    /// Firing never consumes ammo.
    #[serde(default)]
    pub unlimited_ammo: bool,
    /// Muzzle flash bloom / post-processing.
    #[serde(default = "default_true")]
    pub muzzle_flash_fx: bool,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_fov() -> f32 {
    75.0
}
fn default_sensitivity() -> f32 {
    2.0
}
fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fullscreen: false,
            fov: default_fov(),
            sensitivity: default_sensitivity(),
            unlimited_ammo: false,
            muzzle_flash_fx: default_true(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse a config file, passing loaded values through the same clamps as the setters.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data)
    }

    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let mut config: Self = ron::from_str(data)?;
        config.set_fov(config.fov);
        config.set_sensitivity(config.sensitivity);
        Ok(config)
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Err(e) = self.save_to(&path) {
            log::warn!("Could not write config: {}", e);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Set the field of view, clamped to [65, 120] and rounded to whole degrees.
    pub fn set_fov(&mut self, fov: f32) {
        let fov = if fov.is_finite() { fov } else { default_fov() };
        self.fov = fov.clamp(FOV_MIN, FOV_MAX).round();
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Set mouse sensitivity, clamped to [0.5, 10] and rounded to one decimal.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        let s = if sensitivity.is_finite() { sensitivity } else { default_sensitivity() };
        self.sensitivity = (s.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX) * 10.0).round() / 10.0;
    }

    /// Radians of yaw/pitch per mouse count.
    pub fn look_scale(&self) -> f32 {
        self.sensitivity * LOOK_SCALE_PER_SENSITIVITY
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
