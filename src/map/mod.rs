//! Map resources
//!
//! Floor assets, minimap cropping, circular masks, the rotation remap table
//! and the tracking debug view.

pub mod assets;
pub mod debug;
pub mod geometry;
pub mod keywords;
pub mod mask;
pub mod resource;
pub mod rotation;

use std::path::PathBuf;

use geometry::Area;

pub use assets::AssetRoots;
pub use debug::{MinimapViewer, PngViewer, TrackingState};
pub use keywords::{MapPlane, PlaneQuery, World};
pub use resource::{MapResource, DEFAULT_FLOOR, SPECIAL_PLANES};
pub use rotation::RotationRemap;

/// Map resource errors
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map plane not found: {0}")]
    PlaneNotFound(String),
    #[error("Floor {floor} not found in plane {plane}")]
    FloorNotFound { plane: String, floor: String },
    #[error("Dependency \"srcmap\" is not installed")]
    SrcmapMissing,
    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to save image {}: {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Area {area:?} is outside of image {width}x{height}")]
    CropOutOfBounds { area: Area, width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
