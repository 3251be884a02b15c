//! Ink blot overlay

use ppmwarp_core::{Image, Rgb};

/// Paint a solid disk of `color` centered on the image.
///
/// The center is `((w-1)/2, (h-1)/2)`; a pixel is covered when its
/// squared distance from the center is at most `radius^2`. Returns a copy
/// when `radius <= 0` or `color` is `None`.
pub fn apply_ink_blot(image: &Image, radius: i32, color: Option<Rgb>) -> Image {
    let mut out = image.clone();
    let Some(color) = color else {
        return out;
    };
    if radius <= 0 {
        return out;
    }

    let (w, h) = image.dimensions();
    let radius_sq = radius as f64 * radius as f64;
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    for y in 0..h {
        let dy = y as f64 - cy;
        let dy_sq = dy * dy;
        for x in 0..w {
            let dx = x as f64 - cx;
            if dx * dx + dy_sq <= radius_sq {
                out.set_pixel_unchecked(x, y, color);
            }
        }
    }

    log::debug!("ink blot radius {} color {} on {}x{}", radius, color.to_hex(), w, h);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blot_disabled() {
        let img = Image::filled(9, 9, Rgb::WHITE).unwrap();
        assert_eq!(apply_ink_blot(&img, 0, Some(Rgb::BLACK)), img);
        assert_eq!(apply_ink_blot(&img, -3, Some(Rgb::BLACK)), img);
        assert_eq!(apply_ink_blot(&img, 4, None), img);
    }

    #[test]
    fn test_blot_containment() {
        let img = Image::filled(21, 21, Rgb::WHITE).unwrap();
        let red = Rgb::new(255, 0, 0);
        let out = apply_ink_blot(&img, 5, Some(red));
        assert_eq!(out.get_pixel(10, 10), Some(red));
        assert_eq!(out.get_pixel(15, 10), Some(red));
        assert_eq!(out.get_pixel(13, 14), Some(red));
        assert_eq!(out.get_pixel(16, 10), Some(Rgb::WHITE));
        assert_eq!(out.get_pixel(14, 14), Some(Rgb::WHITE));
        assert_eq!(out.get_pixel(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_blot_even_size_center() {
        // 4x4 center is (1.5, 1.5); radius 1 covers the middle 2x2 only
        let img = Image::filled(4, 4, Rgb::WHITE).unwrap();
        let out = apply_ink_blot(&img, 1, Some(Rgb::BLACK));
        let blacks: Vec<(u32, u32)> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| out.get_pixel(x, y) == Some(Rgb::BLACK))
            .collect();
        assert_eq!(blacks, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_blot_larger_than_image() {
        let img = Image::filled(3, 2, Rgb::WHITE).unwrap();
        let out = apply_ink_blot(&img, 50, Some(Rgb::BLACK));
        assert!(out.iter_pixels().all(|p| p == Rgb::BLACK));
    }
}
