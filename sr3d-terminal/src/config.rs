/// Host configuration loaded from TOML
///
/// Every section is optional; missing values fall back to defaults that
/// reproduce the stock scene (a cube scaled by 100 at the origin, viewed from
/// 200 units down the -Y axis).
use serde::{Deserialize, Serialize};
use sr3d_core::{CameraConfig, Color};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub target_fps: u32,
    /// Pointer units per terminal cell of mouse motion
    pub mouse_gain: f32,
    /// Pointer units per arrow key press
    pub look_step: f32,
    pub background: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            mouse_gain: 64.0,
            look_step: 96.0,
            background: Color::BLACK,
        }
    }
}

/// One mesh instance placed directly under the scene root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Geometry file; the built-in cube when absent
    pub path: Option<PathBuf>,
    pub position: [f32; 3],
    pub rotation_degrees: [f32; 3],
    pub scale: f32,
    pub color: Color,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            position: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scale: 1.0,
            color: Color::RED,
        }
    }
}

impl ModelConfig {
    /// The scene shown when nothing else is configured
    pub fn default_cube() -> Self {
        Self {
            scale: 100.0,
            ..Self::default()
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be between 0 and 180, got {}",
                fov
            )));
        }
        if self.display.target_fps == 0 {
            return Err(ConfigError::Invalid("display.target_fps must be positive".into()));
        }
        Ok(())
    }
}
