//! Runtime settings
//!
//! Defines the configurable values consumed by the map resources and the
//! task dispatcher.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the srcmap asset package location
pub const SRCMAP_ENV: &str = "SRCMAP";

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Override path to the installed srcmap asset package
    pub srcmap: Option<PathBuf>,
    /// Root of the assets bundled with the program
    pub local_assets_dir: PathBuf,
    /// Minimap geometry on the 1280x720 screen
    pub minimap: MinimapSettings,
    /// Debug visualizer settings
    pub debug: DebugSettings,
    /// Whether the game runs through the cloud client
    pub is_cloud_game: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            srcmap: None,
            local_assets_dir: PathBuf::from("assets"),
            minimap: MinimapSettings::default(),
            debug: DebugSettings::default(),
            is_cloud_game: false,
        }
    }
}

impl Settings {
    /// Settings for local development against a checked-out srcmap
    pub fn development(srcmap: impl Into<PathBuf>) -> Self {
        Self {
            srcmap: Some(srcmap.into()),
            debug: DebugSettings {
                output_dir: PathBuf::from("debug"),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&content)?;
        log::debug!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Apply environment overrides on top of the loaded values
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(srcmap) = std::env::var_os(SRCMAP_ENV).filter(|v| !v.is_empty()) {
            self.srcmap = Some(PathBuf::from(srcmap));
        }
        self
    }
}

/// Minimap placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapSettings {
    /// Center of the minimap on screen (x, y)
    pub center: (i32, i32),
    /// Radius of the minimap in pixels
    pub radius: u32,
}

impl Default for MinimapSettings {
    fn default() -> Self {
        Self {
            center: (78 + 57, 129 + 57),
            radius: 57,
        }
    }
}

/// Debug visualizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Name of the tracking window
    pub window_name: String,
    /// Directory where rendered frames are written
    pub output_dir: PathBuf,
    /// Radius of the position marker
    pub marker_radius: i32,
    /// Length of the heading segments
    pub vector_length: f32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            window_name: "MinimapTracking".to_string(),
            output_dir: std::env::temp_dir().join("sr-copilot"),
            marker_radius: 5,
            vector_length: 30.0,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
