//! Resampling scale
//!
//! Scales an image by independent horizontal and vertical factors using
//! center-aligned bilinear gather: output pixel `d` maps to source
//! coordinate `(d + 0.5) * (src_size / dest_size) - 0.5` on each axis.

use crate::nearly_equal;
use crate::sampler::sample_bilinear;
use ppmwarp_core::{Image, Rgb};

/// Output size for scaling `width x height` by `(sx, sy)`.
///
/// Each dimension is `round(size * factor)`, floored at 1. Zero,
/// negative and NaN factors all yield 1.
pub fn scaled_dimensions(width: u32, height: u32, sx: f64, sy: f64) -> (u32, u32) {
    (scaled_size(width, sx), scaled_size(height, sy))
}

#[inline]
fn scaled_size(size: u32, factor: f64) -> u32 {
    // `as` saturates and maps NaN to 0
    ((size as f64 * factor).round() as u32).max(1)
}

/// Scale an image by `(sx, sy)`.
///
/// Factors within [`EPSILON`](crate::EPSILON) of 1.0 on both axes
/// return an identical copy. Never fails; degenerate factors produce a
/// 1-pixel-wide (or tall) result.
///
/// # Examples
///
/// ```
/// use ppmwarp_core::{Image, Rgb};
/// use ppmwarp_transform::scale;
///
/// let img = Image::filled(10, 4, Rgb::BLACK).unwrap();
/// let out = scale(&img, 0.5, 2.0);
/// assert_eq!(out.dimensions(), (5, 8));
/// ```
pub fn scale(image: &Image, sx: f64, sy: f64) -> Image {
    if nearly_equal(sx, 1.0) && nearly_equal(sy, 1.0) {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let (new_w, new_h) = scaled_dimensions(w, h, sx, sy);
    let ratio_x = w as f64 / new_w as f64;
    let ratio_y = h as f64 / new_h as f64;

    let mut out = Image::canvas(new_w, new_h, Rgb::WHITE);
    for y in 0..new_h {
        let src_y = (y as f64 + 0.5) * ratio_y - 0.5;
        for x in 0..new_w {
            let src_x = (x as f64 + 0.5) * ratio_x - 0.5;
            out.set_pixel_unchecked(x, y, sample_bilinear(image, src_x, src_y));
        }
    }

    log::debug!("scale {}x{} by ({}, {}) -> {}x{}", w, h, sx, sy, new_w, new_h);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_identity() {
        let mut img = Image::filled(5, 3, Rgb::WHITE).unwrap();
        img.set_pixel(2, 1, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(scale(&img, 1.0, 1.0), img);
        assert_eq!(scale(&img, 1.0 + 1e-12, 1.0 - 1e-12), img);
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(10, 10, 1.25, 0.5), (13, 5));
        assert_eq!(scaled_dimensions(10, 10, 0.0, -2.0), (1, 1));
        assert_eq!(scaled_dimensions(10, 10, f64::NAN, 0.04), (1, 1));
        assert_eq!(scaled_dimensions(3, 3, 0.5, 0.5), (2, 2));
    }

    #[test]
    fn test_scale_degenerate_factors() {
        let img = Image::filled(8, 8, Rgb::BLACK).unwrap();
        let out = scale(&img, 0.0, -1.0);
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(out.pixels().len(), 3);
    }

    #[test]
    fn test_scale_solid_stays_solid() {
        let color = Rgb::new(10, 200, 30);
        let img = Image::filled(7, 5, color).unwrap();
        let out = scale(&img, 1.7, 0.6);
        assert_eq!(out.dimensions(), (12, 3));
        assert!(out.iter_pixels().all(|p| p == color));
    }

    #[test]
    fn test_scale_up_double() {
        // 2x1 black/white doubles to 4x1: centers map to -0.25, 0.25, 0.75, 1.25
        let mut img = Image::filled(2, 1, Rgb::BLACK).unwrap();
        img.set_pixel(1, 0, Rgb::WHITE).unwrap();
        let out = scale(&img, 2.0, 1.0);
        let values: Vec<u8> = out.iter_pixels().map(|p| p.r).collect();
        assert_eq!(values, vec![0, 64, 191, 255]);
    }
}
