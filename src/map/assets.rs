//! Asset roots and image loading
//!
//! Floor images ship in the separate srcmap package; feature maps, area
//! definitions and arrow templates are bundled with the program.

use image::{GrayImage, RgbImage};
use std::path::{Path, PathBuf};

use super::MapError;
use crate::config::Settings;

/// Resolved locations of the two asset roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoots {
    /// Installed srcmap package
    pub srcmap: PathBuf,
    /// Assets bundled with the program
    pub local: PathBuf,
}

impl AssetRoots {
    /// Resolve both roots from settings
    ///
    /// Fails with [`MapError::SrcmapMissing`] when no srcmap location is
    /// configured, which is a deployment problem rather than a runtime one.
    pub fn resolve(settings: &Settings) -> Result<Self, MapError> {
        let Some(srcmap) = settings.srcmap.as_ref() else {
            log::error!("Dependency \"srcmap\" is not installed");
            return Err(MapError::SrcmapMissing);
        };

        let roots = Self {
            srcmap: std::path::absolute(srcmap)?,
            local: std::path::absolute(&settings.local_assets_dir)?,
        };
        log::debug!(
            "Asset roots: srcmap={}, local={}",
            roots.srcmap.display(),
            roots.local.display()
        );
        Ok(roots)
    }

    /// Path of a srcmap asset such as `./position/Herta/Herta_ParlorCar.png`
    pub fn srcmap_path(&self, file: &str) -> PathBuf {
        join_relative(&self.srcmap, file)
    }

    /// Path of a bundled asset
    pub fn local_path(&self, file: &str) -> PathBuf {
        join_relative(&self.local, file)
    }

    /// Load a color image from the srcmap package
    pub fn load_image(&self, file: &str) -> Result<RgbImage, MapError> {
        Ok(open_image(&self.srcmap_path(file))?.into_rgb8())
    }

    /// Load a grayscale image from the bundled assets
    pub fn load_image_local(&self, file: &str) -> Result<GrayImage, MapError> {
        Ok(open_image(&self.local_path(file))?.into_luma8())
    }
}

fn join_relative(root: &Path, file: &str) -> PathBuf {
    let file = file.strip_prefix("./").unwrap_or(file);
    root.join(file)
}

fn open_image(path: &Path) -> Result<image::DynamicImage, MapError> {
    log::debug!("Loading image {}", path.display());
    image::open(path).map_err(|source| MapError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}
