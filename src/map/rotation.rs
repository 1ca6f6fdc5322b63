//! Polar unwrap lookup table for the minimap
//!
//! Row `i` of the table samples the circle of radius `i / 2` around the
//! minimap center and column `j` the angle `2πj / d`, so a rotation of the
//! minimap becomes a horizontal shift of the unwrapped image.

use image::{GenericImageView, GrayImage, Luma};
use ndarray::Array2;
use std::f64::consts::PI;

/// Remap grids for a minimap of diameter `2 * radius`
#[derive(Debug, Clone, PartialEq)]
pub struct RotationRemap {
    /// Source x coordinate for each output pixel, indexed `[i, j]`
    pub map_x: Array2<f32>,
    /// Source y coordinate for each output pixel, indexed `[i, j]`
    pub map_y: Array2<f32>,
}

impl RotationRemap {
    /// Build the tables for the given minimap radius
    pub fn new(radius: u32) -> Self {
        let d = (radius * 2) as usize;
        let center = d as f64 / 2.0;

        let map_x = Array2::from_shape_fn((d, d), |(i, j)| {
            let angle = 2.0 * PI * j as f64 / d as f64;
            (center + i as f64 / 2.0 * angle.cos()) as f32
        });
        let map_y = Array2::from_shape_fn((d, d), |(i, j)| {
            let angle = 2.0 * PI * j as f64 / d as f64;
            (center + i as f64 / 2.0 * angle.sin()) as f32
        });

        Self { map_x, map_y }
    }

    /// Side length of the square tables
    pub fn diameter(&self) -> usize {
        self.map_x.nrows()
    }

    /// Remap an image through the tables with bilinear sampling
    ///
    /// Samples falling outside the source contribute 0.
    pub fn apply<I>(&self, image: &I) -> GrayImage
    where
        I: GenericImageView<Pixel = Luma<u8>>,
    {
        let (rows, cols) = self.map_x.dim();
        GrayImage::from_fn(cols as u32, rows as u32, |j, i| {
            let x = self.map_x[[i as usize, j as usize]];
            let y = self.map_y[[i as usize, j as usize]];
            Luma([sample_bilinear(image, x, y)])
        })
    }
}

fn sample_bilinear<I>(image: &I, x: f32, y: f32) -> u8
where
    I: GenericImageView<Pixel = Luma<u8>>,
{
    let (width, height) = image.dimensions();
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let at = |px: f32, py: f32| -> f32 {
        if px < 0.0 || py < 0.0 || px >= width as f32 || py >= height as f32 {
            0.0
        } else {
            image.get_pixel(px as u32, py as u32)[0] as f32
        }
    };

    let top = at(x0, y0) * (1.0 - fx) + at(x0 + 1.0, y0) * fx;
    let bottom = at(x0, y0 + 1.0) * (1.0 - fx) + at(x0 + 1.0, y0 + 1.0) * fx;
    (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
}
