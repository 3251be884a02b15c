//! Bilinear sampling
//!
//! The shared gather primitive for [`scale`](crate::scale()) and
//! [`rotate`](crate::rotate()). Coordinates are clamped to the image
//! edges, so any `f64` (including NaN and infinities) can be sampled.

use ppmwarp_core::{Image, Rgb};

/// Sample `image` at a fractional position.
///
/// `fx` is clamped to `[0, width-1]` and `fy` to `[0, height-1]`; NaN
/// clamps to 0. The four surrounding pixels are blended with weights
/// `(1-dx)(1-dy)`, `dx(1-dy)`, `(1-dx)dy` and `dx*dy`, and each channel
/// is rounded half away from zero.
///
/// # Examples
///
/// ```
/// use ppmwarp_core::{Image, Rgb};
/// use ppmwarp_transform::sample_bilinear;
///
/// let mut img = Image::filled(2, 1, Rgb::BLACK).unwrap();
/// img.set_pixel(1, 0, Rgb::gray(100)).unwrap();
/// assert_eq!(sample_bilinear(&img, 0.5, 0.0), Rgb::gray(50));
/// assert_eq!(sample_bilinear(&img, -3.0, 9.0), Rgb::BLACK);
/// ```
pub fn sample_bilinear(image: &Image, fx: f64, fy: f64) -> Rgb {
    let max_x = image.width() - 1;
    let max_y = image.height() - 1;
    let fx = clamp_coord(fx, max_x);
    let fy = clamp_coord(fy, max_y);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let dx = fx - x0 as f64;
    let dy = fy - y0 as f64;

    let w00 = (1.0 - dx) * (1.0 - dy);
    let w10 = dx * (1.0 - dy);
    let w01 = (1.0 - dx) * dy;
    let w11 = dx * dy;

    let p00 = image.get_pixel_unchecked(x0, y0).channels();
    let p10 = image.get_pixel_unchecked(x1, y0).channels();
    let p01 = image.get_pixel_unchecked(x0, y1).channels();
    let p11 = image.get_pixel_unchecked(x1, y1).channels();

    let mut out = [0u8; 3];
    for c in 0..3 {
        let v = p00[c] as f64 * w00
            + p10[c] as f64 * w10
            + p01[c] as f64 * w01
            + p11[c] as f64 * w11;
        out[c] = v.clamp(0.0, 255.0).round() as u8;
    }
    Rgb::from(out)
}

#[inline]
fn clamp_coord(v: f64, max: u32) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, max as f64) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Image {
        // 3x2: row 0 = 0, 100, 200; row 1 = 50, 150, 250
        let mut img = Image::new(3, 2).unwrap();
        for x in 0..3u32 {
            img.set_pixel(x, 0, Rgb::gray((x * 100) as u8)).unwrap();
            img.set_pixel(x, 1, Rgb::gray((x * 100 + 50) as u8)).unwrap();
        }
        img
    }

    #[test]
    fn test_integer_positions_exact() {
        let img = ramp();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(
                    sample_bilinear(&img, x as f64, y as f64),
                    img.get_pixel(x, y).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_interpolation() {
        let img = ramp();
        assert_eq!(sample_bilinear(&img, 0.5, 0.0), Rgb::gray(50));
        assert_eq!(sample_bilinear(&img, 1.0, 0.5), Rgb::gray(125));
        assert_eq!(sample_bilinear(&img, 1.5, 0.5), Rgb::gray(175));
        // 0.25 * 100 = 25 exactly; 0.005 * 100 = 0.5 rounds away from zero
        assert_eq!(sample_bilinear(&img, 0.25, 0.0), Rgb::gray(25));
        assert_eq!(sample_bilinear(&img, 0.005, 0.0), Rgb::gray(1));
    }

    #[test]
    fn test_clamping() {
        let img = ramp();
        assert_eq!(sample_bilinear(&img, -10.0, -10.0), Rgb::gray(0));
        assert_eq!(sample_bilinear(&img, 99.0, 99.0), Rgb::gray(250));
        assert_eq!(sample_bilinear(&img, f64::NAN, f64::NAN), Rgb::gray(0));
        assert_eq!(sample_bilinear(&img, f64::INFINITY, f64::NEG_INFINITY), Rgb::gray(200));
    }

    #[test]
    fn test_single_pixel_image() {
        let img = Image::filled(1, 1, Rgb::new(9, 8, 7)).unwrap();
        assert_eq!(sample_bilinear(&img, 0.7, 0.2), Rgb::new(9, 8, 7));
    }
}
