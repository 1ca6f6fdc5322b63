//! Configuration module
//!
//! Handles asset locations, minimap geometry and debug preferences.

pub mod settings;

pub use settings::{ConfigError, DebugSettings, MinimapSettings, Settings};
