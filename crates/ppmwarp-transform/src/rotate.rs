//! Rotation about the image center
//!
//! The output canvas is the axis-aligned bounding box of the rotated
//! image, initialized to white. Each destination pixel is mapped back
//! into the source by the inverse rotation and sampled bilinearly; pixels
//! whose preimage falls outside the source stay white.

use crate::nearly_equal;
use crate::sampler::sample_bilinear;
use ppmwarp_core::{Image, Rgb};

/// Canvas size for rotating a `width x height` image by `degrees`.
///
/// `round(|w cos| + |h sin|)` by `round(|w sin| + |h cos|)`, each at
/// least 1.
pub fn rotated_dimensions(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let (sin_a, cos_a) = degrees.to_radians().sin_cos();
    let w = width as f64;
    let h = height as f64;
    let new_w = ((w * cos_a).abs() + (h * sin_a).abs()).round() as u32;
    let new_h = ((w * sin_a).abs() + (h * cos_a).abs()).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate an image by `degrees` about its center.
///
/// Returns a copy when `|degrees|` is below [`EPSILON`](crate::EPSILON).
/// Both source and destination centers are `((size - 1) / 2)` on each
/// axis. A destination pixel at offset `(rx, ry)` from the destination
/// center samples the source at
/// `(cos*rx + sin*ry + cx, -sin*rx + cos*ry + cy)`.
///
/// # Examples
///
/// ```
/// use ppmwarp_core::{Image, Rgb};
/// use ppmwarp_transform::rotate;
///
/// let img = Image::filled(4, 4, Rgb::BLACK).unwrap();
/// let out = rotate(&img, 45.0);
/// assert_eq!(out.dimensions(), (6, 6));
/// ```
pub fn rotate(image: &Image, degrees: f64) -> Image {
    if nearly_equal(degrees, 0.0) {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let (new_w, new_h) = rotated_dimensions(w, h, degrees);
    let (sin_a, cos_a) = degrees.to_radians().sin_cos();

    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;
    let ncx = (new_w as f64 - 1.0) / 2.0;
    let ncy = (new_h as f64 - 1.0) / 2.0;
    let max_x = (w - 1) as f64;
    let max_y = (h - 1) as f64;

    let mut out = Image::canvas(new_w, new_h, Rgb::WHITE);
    for y in 0..new_h {
        let ry = y as f64 - ncy;
        for x in 0..new_w {
            let rx = x as f64 - ncx;
            let src_x = cos_a * rx + sin_a * ry + cx;
            let src_y = -sin_a * rx + cos_a * ry + cy;
            if (0.0..=max_x).contains(&src_x) && (0.0..=max_y).contains(&src_y) {
                out.set_pixel_unchecked(x, y, sample_bilinear(image, src_x, src_y));
            }
        }
    }

    log::debug!("rotate {}x{} by {} deg -> {}x{}", w, h, degrees, new_w, new_h);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_identity() {
        let mut img = Image::filled(5, 3, Rgb::WHITE).unwrap();
        img.set_pixel(1, 2, Rgb::new(4, 5, 6)).unwrap();
        assert_eq!(rotate(&img, 0.0), img);
        assert_eq!(rotate(&img, -1e-12), img);
    }

    #[test]
    fn test_bounding_box_45() {
        // round(4 * (cos45 + sin45)) = round(5.657) = 6
        assert_eq!(rotated_dimensions(4, 4, 45.0), (6, 6));
        let img = Image::filled(4, 4, Rgb::BLACK).unwrap();
        let out = rotate(&img, 45.0);
        assert_eq!(out.dimensions(), (6, 6));
        assert_eq!(out.pixels().len(), 6 * 6 * 3);
    }

    #[test]
    fn test_bounding_box_swaps_at_90() {
        assert_eq!(rotated_dimensions(30, 10, 90.0), (10, 30));
        assert_eq!(rotated_dimensions(30, 10, -90.0), (10, 30));
        assert_eq!(rotated_dimensions(30, 10, 180.0), (30, 10));
    }

    #[test]
    fn test_bounding_box_never_zero() {
        assert_eq!(rotated_dimensions(1, 1, 0.0), (1, 1));
        let (w, h) = rotated_dimensions(1, 1, 45.0);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn test_rotate_corners_white_center_kept() {
        let img = Image::filled(21, 21, Rgb::BLACK).unwrap();
        let out = rotate(&img, 30.0);
        let (w, h) = out.dimensions();
        assert!(w > 21 && h > 21);
        assert_eq!(out.get_pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(out.get_pixel(w - 1, h - 1), Some(Rgb::WHITE));
        assert_eq!(out.get_pixel(w / 2, h / 2), Some(Rgb::BLACK));
    }

    #[test]
    fn test_rotate_preserves_solid_color_inside() {
        let color = Rgb::new(12, 34, 56);
        let img = Image::filled(15, 9, color).unwrap();
        let out = rotate(&img, -17.0);
        assert!(out.iter_pixels().all(|p| p == color || p == Rgb::WHITE));
        assert!(out.iter_pixels().any(|p| p == color));
    }
}
