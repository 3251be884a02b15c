//! Border speckle noise
//!
//! Scatters random gray pixels over a band along the image edges,
//! imitating scanner dirt around a printed page.

use ppmwarp_core::{Image, Rgb, XorShift32};

/// Salt mixed into the seed for the border noise stream.
pub const BORDER_NOISE_SALT: u32 = 0xA5A5_A5A5;

/// Add seeded grayscale speckle to the border band.
///
/// The band is every pixel with `x < t`, `x >= width - t`, `y < t` or
/// `y >= height - t`. Pixels are visited row-major; each band pixel
/// draws a unit value, and if it is below `density` a byte `v` is drawn
/// and the pixel becomes `(v, v, v)`. Pixels outside the band consume no
/// draws, so the stream is fully determined by `seed` and the geometry.
///
/// Returns a copy when `thickness <= 0` or `density <= 0` (NaN counts as
/// 0). Density above 1 is clamped.
///
/// # Examples
///
/// ```
/// use ppmwarp_core::{Image, Rgb};
/// use ppmwarp_transform::add_border_noise;
///
/// let img = Image::filled(20, 20, Rgb::WHITE).unwrap();
/// let a = add_border_noise(&img, 3, 0.5, 7);
/// let b = add_border_noise(&img, 3, 0.5, 7);
/// assert_eq!(a, b);
/// ```
pub fn add_border_noise(image: &Image, thickness: i32, density: f64, seed: i32) -> Image {
    let mut out = image.clone();
    if thickness <= 0 || density.is_nan() || density <= 0.0 {
        return out;
    }
    if density > 1.0 {
        log::warn!("border density {} clamped to 1", density);
    }
    let density = density.min(1.0);

    let (w, h) = image.dimensions();
    let t = thickness as i64;
    let (wi, hi) = (w as i64, h as i64);
    let mut rng = XorShift32::new(seed, BORDER_NOISE_SALT);
    let mut speckled = 0usize;

    for y in 0..h {
        let yi = y as i64;
        let row_in_band = yi < t || yi >= hi - t;
        for x in 0..w {
            let xi = x as i64;
            if !(row_in_band || xi < t || xi >= wi - t) {
                continue;
            }
            if rng.next_unit() < density {
                out.set_pixel_unchecked(x, y, Rgb::gray(rng.next_u8()));
                speckled += 1;
            }
        }
    }

    log::debug!(
        "border noise on {}x{}: thickness {}, density {}, {} pixel(s) speckled",
        w,
        h,
        thickness,
        density,
        speckled
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_disabled() {
        let img = Image::filled(10, 10, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(add_border_noise(&img, 0, 0.9, 1), img);
        assert_eq!(add_border_noise(&img, -4, 0.9, 1), img);
        assert_eq!(add_border_noise(&img, 3, 0.0, 1), img);
        assert_eq!(add_border_noise(&img, 3, -0.5, 1), img);
        assert_eq!(add_border_noise(&img, 3, f64::NAN, 1), img);
    }

    #[test]
    fn test_noise_deterministic() {
        let img = Image::filled(32, 24, Rgb::WHITE).unwrap();
        let a = add_border_noise(&img, 4, 0.35, 1234);
        let b = add_border_noise(&img, 4, 0.35, 1234);
        assert_eq!(a, b);
        let c = add_border_noise(&img, 4, 0.35, 1235);
        assert_ne!(a, c);
    }

    #[test]
    fn test_noise_confined_to_band() {
        let color = Rgb::new(10, 200, 30);
        let img = Image::filled(30, 20, color).unwrap();
        let out = add_border_noise(&img, 3, 1.0, 99);
        for y in 0..20 {
            for x in 0..30 {
                let p = out.get_pixel(x, y).unwrap();
                let in_band = x < 3 || x >= 27 || y < 3 || y >= 17;
                if in_band {
                    // density 1: every band pixel becomes gray
                    assert!(p.is_gray(), "({x}, {y}) = {p:?}");
                } else {
                    assert_eq!(p, color);
                }
            }
        }
    }

    #[test]
    fn test_noise_matches_generator_stream() {
        // 3x1, thickness 1: every pixel is in the band
        let img = Image::filled(3, 1, Rgb::new(1, 2, 3)).unwrap();
        let out = add_border_noise(&img, 1, 1.0, 5);
        let mut rng = XorShift32::new(5, BORDER_NOISE_SALT);
        for x in 0..3 {
            let _ = rng.next_unit();
            let v = rng.next_u8();
            assert_eq!(out.get_pixel(x, 0), Some(Rgb::gray(v)));
        }
    }

    #[test]
    fn test_thick_band_covers_everything() {
        let img = Image::filled(5, 5, Rgb::new(1, 2, 3)).unwrap();
        let out = add_border_noise(&img, 100, 5.0, 0);
        assert!(out.iter_pixels().all(|p| p.is_gray()));
    }
}
