//! # Diorama Configuration
//!
//! Everything a diorama needs besides its manifest: logging, the renderer
//! host surface, camera, asset search roots, environment textures and frame
//! pacing. Every section has a usable default, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::composition::EnvironmentSpec;
use crate::config::{Config, ConfigError};
use crate::render::{CameraConfig, RendererSettings};

/// Logging sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Prefix records with a timestamp
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timestamps: true,
        }
    }
}

/// Where assets are looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Search roots, tried in order
    pub search_paths: Vec<String>,
    /// Optional external manifest (`.toml` or `.ron`)
    pub manifest: Option<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![".".to_string()],
            manifest: None,
        }
    }
}

/// Frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Display refresh rate in Hz
    pub refresh_hz: f64,
    /// Stop after this many frames; `None` runs forever
    pub max_frames: Option<u64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 60.0,
            max_frames: None,
        }
    }
}

/// Complete diorama configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DioramaConfig {
    /// Logging
    pub logging: LoggingConfig,
    /// Renderer host surface
    pub renderer: RendererSettings,
    /// Camera and orbit target
    pub camera: CameraConfig,
    /// Asset lookup
    pub assets: AssetConfig,
    /// Floor and skybox
    pub environment: EnvironmentSpec,
    /// Frame pacing
    pub frame: FrameConfig,
}

impl DioramaConfig {
    /// Reject values that parse but cannot drive a session
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        
        if self.renderer.width == 0 || self.renderer.height == 0 {
            return invalid(format!(
                "surface size {}x{} must be non-zero",
                self.renderer.width, self.renderer.height
            ));
        }
        if self.renderer.pixel_ratio <= 0.0 {
            return invalid(format!("pixel ratio {} must be positive", self.renderer.pixel_ratio));
        }
        if !self.frame.refresh_hz.is_finite() || self.frame.refresh_hz <= 0.0 {
            return invalid(format!("refresh rate {} must be positive", self.frame.refresh_hz));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return invalid(format!(
                "clip planes near={} far={} must satisfy 0 < near < far",
                self.camera.near, self.camera.far
            ));
        }
        if self.camera.fov_degrees <= 0.0 || self.camera.fov_degrees >= 180.0 {
            return invalid(format!("field of view {} must be in (0, 180)", self.camera.fov_degrees));
        }
        if self.assets.search_paths.is_empty() {
            return invalid("at least one asset search path is required".to_string());
        }
        Ok(())
    }
}

impl Config for DioramaConfig {}
