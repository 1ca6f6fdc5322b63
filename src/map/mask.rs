//! Circular mask generation

use image::{GrayImage, Luma};
use ndarray::Array2;

/// Boolean disc inscribed in a `width` x `height` rectangle
///
/// Indexed `[y, x]`. The center is `(w / 2, h / 2)` and the radius the
/// distance to the nearest edge; a pixel is inside when its distance to the
/// center does not exceed the radius.
pub fn create_circular_mask(width: u32, height: u32) -> Array2<bool> {
    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;
    let radius = cx.min(cy).min(width as f64 - cx).min(height as f64 - cy);

    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        (dx * dx + dy * dy).sqrt() <= radius
    })
}

/// Scale a boolean mask to an 8-bit image, 255 inside and 0 outside
pub fn mask_to_image(mask: &Array2<bool>) -> GrayImage {
    let (height, width) = mask.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([if mask[[y as usize, x as usize]] { 255 } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_mask_shape() {
        let mask = create_circular_mask(10, 6);
        assert_eq!(mask.dim(), (6, 10));

        // Radius is 3 around (5, 3)
        assert!(mask[[3, 5]]);
        assert!(mask[[3, 2]]);
        assert!(mask[[0, 5]]);
        assert!(!mask[[3, 1]]);
        assert!(!mask[[0, 0]]);
    }

    #[test]
    fn test_circular_mask_is_symmetric() {
        let mask = create_circular_mask(9, 9);
        for y in 0..9 {
            for x in 0..9 {
                assert_eq!(mask[[y, x]], mask[[x, y]]);
                assert_eq!(mask[[y, x]], mask[[8 - y, 8 - x]]);
            }
        }
    }

    #[test]
    fn test_mask_to_image() {
        let mask = create_circular_mask(8, 8);
        let image = mask_to_image(&mask);
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.get_pixel(4, 4)[0], 255);
        assert_eq!(image.get_pixel(0, 0)[0], 0);
        assert!(image.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
