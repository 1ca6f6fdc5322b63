//! SR Copilot - Honkai: Star Rail automation for Android
//!
//! This library provides the map resources used by minimap tracking (floor
//! assets, minimap crops, circle masks and the rotation remap table) and the
//! dispatch table connecting scheduler tasks to their implementations.
//!
//! ## Assets
//!
//! Floor images come from the separately installed srcmap package, located
//! through [`config::Settings::srcmap`] or the `SRCMAP` environment variable.

pub mod config;
pub mod map;
pub mod tasks;

pub use config::Settings;
pub use map::{MapError, MapResource};
pub use tasks::{Copilot, Task, TaskExecutor};

/// Initialize platform logging
///
/// On desktop the embedding program installs its own `log` backend.
pub fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("sr-copilot"),
    );
}
