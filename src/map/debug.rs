//! Tracking debug view
//!
//! Draws the estimated position and headings on the floor image. This is a
//! developer aid and plays no part in the automation itself.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use std::path::PathBuf;

use super::MapError;
use crate::config::DebugSettings;

const POSITION_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const DIRECTION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const ROTATION_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Tracking estimate to visualize
///
/// `direction` and `rotation` are separate heading estimates in degrees,
/// 0 pointing up and increasing clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackingState {
    /// Position on the floor image
    pub position: (f32, f32),
    /// Character direction
    pub direction: f32,
    /// Camera rotation
    pub rotation: f32,
}

/// Somewhere to show rendered debug frames
pub trait MinimapViewer {
    /// Show a frame under the given window name
    fn show(&mut self, name: &str, image: &RgbImage) -> Result<(), MapError>;

    /// Give the viewer one tick to process input
    fn poll(&mut self) -> Result<(), MapError> {
        Ok(())
    }
}

/// Viewer that keeps the latest frame of each window as a PNG file
pub struct PngViewer {
    output_dir: PathBuf,
    frames: u64,
}

impl PngViewer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            frames: 0,
        }
    }

    /// Frames shown so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// File the given window is written to
    pub fn frame_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.png"))
    }
}

impl MinimapViewer for PngViewer {
    fn show(&mut self, name: &str, image: &RgbImage) -> Result<(), MapError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.frame_path(name);
        image.save(&path).map_err(|source| MapError::ImageSave {
            path: path.clone(),
            source,
        })?;
        self.frames += 1;
        log::debug!("Wrote {} frame {} to {}", name, self.frames, path.display());
        Ok(())
    }
}

/// End point of a heading segment starting at `position`
pub fn heading_vector(position: (f32, f32), degree: f32, length: f32) -> (f32, f32) {
    let radian = (degree - 90.0).to_radians();
    (
        position.0 + radian.cos() * length,
        position.1 + radian.sin() * length,
    )
}

/// Pixel a heading segment ends on, truncated like the position marker
pub fn segment_end(position: (f32, f32), degree: f32, length: f32) -> (f32, f32) {
    let (x, y) = heading_vector(position, degree, length);
    (x as i32 as f32, y as i32 as f32)
}

/// Draw the tracking state on a copy of the floor image
pub fn render_minimap(
    floor: &RgbImage,
    tracking: &TrackingState,
    settings: &DebugSettings,
) -> RgbImage {
    let mut image = floor.clone();
    let (x, y) = tracking.position;
    let center = (x as i32, y as i32);
    let start = (center.0 as f32, center.1 as f32);

    draw_filled_circle_mut(&mut image, center, settings.marker_radius, POSITION_COLOR);
    for (degree, color) in [
        (tracking.direction, DIRECTION_COLOR),
        (tracking.rotation, ROTATION_COLOR),
    ] {
        let end = segment_end(start, degree, settings.vector_length);
        draw_thick_segment(&mut image, start, end, color);
    }
    image
}

/// Two pixel wide line segment
fn draw_thick_segment(image: &mut RgbImage, start: (f32, f32), end: (f32, f32), color: Rgb<u8>) {
    draw_line_segment_mut(image, start, end, color);
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let offset = if dx.abs() >= dy.abs() { (0.0, 1.0) } else { (1.0, 0.0) };
    draw_line_segment_mut(
        image,
        (start.0 + offset.0, start.1 + offset.1),
        (end.0 + offset.0, end.1 + offset.1),
        color,
    );
}
