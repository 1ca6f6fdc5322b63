//! Rectangle helpers for cropping screen regions

use image::{GenericImageView, SubImage};
use serde::{Deserialize, Serialize};

use super::MapError;

/// Rectangle as (x1, y1, x2, y2), upper bounds exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Move the area by (dx, dy), saturating at the `i32` range
    pub fn offset(&self, (dx, dy): (i32, i32)) -> Self {
        Self::new(
            self.x1.saturating_add(dx),
            self.y1.saturating_add(dy),
            self.x2.saturating_add(dx),
            self.y2.saturating_add(dy),
        )
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Whether the area lies within an image of the given size
    pub fn fits_in(&self, width: u32, height: u32) -> bool {
        self.x1 >= 0
            && self.y1 >= 0
            && self.x1 <= self.x2
            && self.y1 <= self.y2
            && self.x2 as i64 <= width as i64
            && self.y2 as i64 <= height as i64
    }
}

/// Width and height of an image
pub fn image_size<I: GenericImageView>(image: &I) -> (u32, u32) {
    image.dimensions()
}

/// Crop an area without copying pixels
///
/// The returned view borrows `image`; call `to_image()` for an owned copy.
pub fn crop<I: GenericImageView>(image: &I, area: Area) -> Result<SubImage<&I>, MapError> {
    let (width, height) = image.dimensions();
    if !area.fits_in(width, height) {
        return Err(MapError::CropOutOfBounds {
            area,
            width,
            height,
        });
    }

    Ok(image::imageops::crop_imm(
        image,
        area.x1 as u32,
        area.y1 as u32,
        area.width() as u32,
        area.height() as u32,
    ))
}
