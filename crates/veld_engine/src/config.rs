//! Engine configuration.
//!
//! Loaded from a TOML file at startup; every section falls back to
//! stock values so a missing or partial file still yields a runnable
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("config file '{0}' not found or unreadable")]
    FileNotFound(String),
    /// The file is not valid TOML or has wrong field types
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Window parameters the embedding layer opens the window with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "veld".to_string(),
        }
    }
}

/// Perspective projection parameters; also the frustum source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Vertical field of view, degrees
    pub fov: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 3_000_000.0,
        }
    }
}

/// Physics world parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector, m/s^2
    pub gravity: [f32; 3],
    /// Error reduction parameter for contact correction
    pub erp: f32,
    /// Constraint force mixing softness
    pub cfm: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            erp: 0.8,
            cfm: 1e-5,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window parameters
    pub window: WindowConfig,
    /// Projection parameters
    pub viewport: ViewportConfig,
    /// Physics parameters
    pub physics: PhysicsConfig,
    /// Target seconds per frame; `update` sleeps out the remainder
    pub frame_interval: f32,
    /// Whether hierarchical frustum culling runs each frame
    pub culling: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            viewport: ViewportConfig::default(),
            physics: PhysicsConfig::default(),
            frame_interval: 0.02,
            culling: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        Self::from_toml(&text)
    }

    /// Aspect ratio of the configured window.
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height as f32
    }
}
