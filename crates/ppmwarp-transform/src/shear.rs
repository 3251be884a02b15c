//! Shear transformations
//!
//! Shifts each row (horizontal shear) or column (vertical shear) by an
//! amount proportional to its index, so the first row/column stays put
//! and the last one moves by the full `amount` pixels.
//!
//! # Scatter mapping
//!
//! Unlike [`scale`](crate::scale()) and [`rotate`](crate::rotate()),
//! shear pushes every source pixel to its rounded destination without
//! interpolation. At non-integer slopes two neighbors can round to the
//! same destination, leaving single-pixel white gaps in the output.
//!
//! # Canvas
//!
//! The sheared axis grows by `ceil(max(0, amount) - min(0, amount))`
//! and is white-initialized. A negative amount is compensated by an
//! offset of `-amount` so no content is pushed off the left/top edge.

use crate::EPSILON;
use ppmwarp_core::{Image, Rgb};

// ============================================================================
// Geometry
// ============================================================================

/// Per-index displacement shared by both shear directions.
#[derive(Debug, Clone, Copy)]
struct ShearGeometry {
    /// Shift per row (or column) index
    slope: f64,
    /// Added to every destination so negative shifts stay on canvas
    offset: f64,
    /// Extra pixels along the sheared axis
    grow: u32,
}

impl ShearGeometry {
    /// `lines` is the number of rows (horizontal) or columns (vertical).
    fn new(amount: f64, lines: u32) -> Self {
        let slope = if lines > 1 {
            amount / (lines - 1) as f64
        } else {
            0.0
        };
        let min_shift = amount.min(0.0);
        let max_shift = amount.max(0.0);
        Self {
            slope,
            offset: -min_shift,
            grow: (max_shift - min_shift).ceil() as u32,
        }
    }

    /// Destination index for `pos` on line `line`, if it lands in `[0, size)`.
    #[inline]
    fn destination(&self, pos: u32, line: u32, size: u32) -> Option<u32> {
        let dest = (pos as f64 + self.slope * line as f64 + self.offset).round();
        if dest >= 0.0 && dest < size as f64 {
            Some(dest as u32)
        } else {
            None
        }
    }
}

fn is_noop(amount: f64) -> bool {
    amount.abs() < EPSILON
}

// ============================================================================
// Public API
// ============================================================================

/// Horizontally shear an image by `amount` pixels.
///
/// Row `y` is shifted right by `amount * y / (height - 1)`; the output is
/// `ceil(|amount|)` pixels wider. Returns a copy when `|amount|` is below
/// [`EPSILON`].
///
/// # Examples
///
/// ```
/// use ppmwarp_core::{Image, Rgb};
/// use ppmwarp_transform::shear_horizontal;
///
/// let img = Image::filled(10, 5, Rgb::BLACK).unwrap();
/// let out = shear_horizontal(&img, -3.5);
/// assert_eq!(out.dimensions(), (14, 5));
/// ```
pub fn shear_horizontal(image: &Image, amount: f64) -> Image {
    let (w, h) = image.dimensions();
    if is_noop(amount) || h == 0 {
        return image.clone();
    }

    let geom = ShearGeometry::new(amount, h);
    let new_w = w.saturating_add(geom.grow);
    let mut out = Image::canvas(new_w, h, Rgb::WHITE);

    for y in 0..h {
        for x in 0..w {
            if let Some(dest_x) = geom.destination(x, y, new_w) {
                out.set_pixel_unchecked(dest_x, y, image.get_pixel_unchecked(x, y));
            }
        }
    }

    log::debug!("horizontal shear {}x{} by {} -> {}x{}", w, h, amount, new_w, h);
    out
}

/// Vertically shear an image by `amount` pixels.
///
/// Column `x` is shifted down by `amount * x / (width - 1)`; the output is
/// `ceil(|amount|)` pixels taller. Returns a copy when `|amount|` is below
/// [`EPSILON`].
pub fn shear_vertical(image: &Image, amount: f64) -> Image {
    let (w, h) = image.dimensions();
    if is_noop(amount) || w == 0 {
        return image.clone();
    }

    let geom = ShearGeometry::new(amount, w);
    let new_h = h.saturating_add(geom.grow);
    let mut out = Image::canvas(w, new_h, Rgb::WHITE);

    for x in 0..w {
        for y in 0..h {
            if let Some(dest_y) = geom.destination(y, x, new_h) {
                out.set_pixel_unchecked(x, dest_y, image.get_pixel_unchecked(x, y));
            }
        }
    }

    log::debug!("vertical shear {}x{} by {} -> {}x{}", w, h, amount, w, new_h);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> Image {
        let mut img = Image::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                img.set_pixel(x, y, Rgb::new(x as u8, y as u8, 0)).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_shear_identity() {
        let img = numbered(4, 3);
        assert_eq!(shear_horizontal(&img, 0.0), img);
        assert_eq!(shear_vertical(&img, 1e-12), img);
    }

    #[test]
    fn test_horizontal_integer_shift() {
        let img = numbered(4, 3);
        let out = shear_horizontal(&img, 2.0);
        assert_eq!(out.dimensions(), (6, 3));
        // row 0 unshifted, row 1 by 1, row 2 by 2
        assert_eq!(out.get_pixel(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(out.get_pixel(5, 0), Some(Rgb::WHITE));
        assert_eq!(out.get_pixel(0, 1), Some(Rgb::WHITE));
        assert_eq!(out.get_pixel(1, 1), Some(Rgb::new(0, 1, 0)));
        assert_eq!(out.get_pixel(2, 2), Some(Rgb::new(0, 2, 0)));
        assert_eq!(out.get_pixel(5, 2), Some(Rgb::new(3, 2, 0)));
    }

    #[test]
    fn test_horizontal_negative_shift() {
        let img = numbered(4, 3);
        let out = shear_horizontal(&img, -2.0);
        assert_eq!(out.dimensions(), (6, 3));
        // row 0 is offset by 2, the last row lands at the left edge
        assert_eq!(out.get_pixel(2, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(out.get_pixel(0, 2), Some(Rgb::new(0, 2, 0)));
        assert_eq!(out.get_pixel(5, 2), Some(Rgb::WHITE));
    }

    #[test]
    fn test_vertical_integer_shift() {
        let img = numbered(3, 4);
        let out = shear_vertical(&img, 2.0);
        assert_eq!(out.dimensions(), (3, 6));
        assert_eq!(out.get_pixel(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(out.get_pixel(1, 1), Some(Rgb::new(1, 0, 0)));
        assert_eq!(out.get_pixel(2, 5), Some(Rgb::new(2, 3, 0)));
        assert_eq!(out.get_pixel(2, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_fractional_growth_rounds_up() {
        let img = numbered(5, 5);
        assert_eq!(shear_horizontal(&img, 0.3).dimensions(), (6, 5));
        assert_eq!(shear_vertical(&img, -2.2).dimensions(), (5, 8));
    }

    #[test]
    fn test_single_row_has_zero_slope() {
        let img = numbered(4, 1);
        let out = shear_horizontal(&img, 3.0);
        assert_eq!(out.dimensions(), (7, 1));
        for x in 0..4 {
            assert_eq!(out.get_pixel(x, 0), img.get_pixel(x, 0));
        }
    }

    #[test]
    fn test_scatter_leaves_background() {
        // 10x10 solid black sheared by 4.5: slope 0.5 per row. Row 1
        // shifts by 0.5, which rounds away from zero, so source x=0 lands
        // on 1 and destination 0 is never written.
        let img = Image::filled(10, 10, Rgb::BLACK).unwrap();
        let out = shear_horizontal(&img, 4.5);
        assert_eq!(out.dimensions(), (15, 10));
        assert_eq!(out.get_pixel(0, 1), Some(Rgb::WHITE));

        let blacks = out.iter_pixels().filter(|&p| p == Rgb::BLACK).count();
        let whites = out.iter_pixels().filter(|&p| p == Rgb::WHITE).count();
        assert_eq!(blacks, 100);
        assert_eq!(whites, 50);
    }

    #[test]
    fn test_size_invariant() {
        let img = numbered(7, 3);
        for amount in [-5.5, -1.0, 0.25, 3.0, 12.75] {
            let h = shear_horizontal(&img, amount);
            assert_eq!(h.pixels().len(), (h.width() * h.height() * 3) as usize);
            let v = shear_vertical(&img, amount);
            assert_eq!(v.pixels().len(), (v.width() * v.height() * 3) as usize);
        }
    }
}
