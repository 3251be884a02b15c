//! Paper tint
//!
//! Blends the image toward a paper color, optionally modulated by a
//! smooth random "splotch" field so the tint and shading vary across the
//! page like aged or uneven paper.
//!
//! # Splotch field
//!
//! A coarse grid of random bytes, one per `splotch_px` cell plus a
//! border, is interpolated bilinearly with integer weights to give a
//! value `n` in `[0, 1]` at each pixel. The per-pixel blend is then
//!
//! ```text
//! alpha = clamp(alpha + splotch_alpha * n)
//! shade = clamp(1 - splotch_shade * n)
//! c'    = round((c * (1 - alpha) + paper * alpha) * shade)
//! ```

use crate::{TransformError, TransformResult, clamp_unit};
use ppmwarp_core::{Image, Rgb, XorShift32};

/// Salt mixed into the seed for the splotch grid stream.
pub const PAPER_TINT_SALT: u32 = 0xBADC_0FFE;

/// Paper tint parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperTint {
    /// Paper color; the stage is inactive without one
    pub color: Option<Rgb>,
    /// Base blend factor toward the paper color
    pub alpha: f64,
    /// Extra blend factor scaled by the splotch field
    pub splotch_alpha: f64,
    /// Darkening scaled by the splotch field
    pub splotch_shade: f64,
    /// Splotch cell size in pixels (non-positive = uniform tint)
    pub splotch_px: i32,
}

impl PaperTint {
    /// Create a tint toward `color` with no blending yet.
    pub fn with_color(color: Rgb) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// Set the base blend factor
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the splotch blend factor
    pub fn splotch_alpha(mut self, splotch_alpha: f64) -> Self {
        self.splotch_alpha = splotch_alpha;
        self
    }

    /// Set the splotch darkening factor
    pub fn splotch_shade(mut self, splotch_shade: f64) -> Self {
        self.splotch_shade = splotch_shade;
        self
    }

    /// Set the splotch cell size
    pub fn splotch_px(mut self, splotch_px: i32) -> Self {
        self.splotch_px = splotch_px;
        self
    }

    /// Whether any blend or shade factor is positive.
    pub fn has_strength(&self) -> bool {
        self.alpha > 0.0 || self.splotch_alpha > 0.0 || self.splotch_shade > 0.0
    }

    /// Whether applying this tint changes anything.
    pub fn is_active(&self) -> bool {
        self.color.is_some() && self.has_strength()
    }

    /// Check that a positive strength comes with a paper color.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameters`] when a blend or shade
    /// factor is positive but no color is set.
    pub fn validate(&self) -> TransformResult<()> {
        if self.has_strength() && self.color.is_none() {
            return Err(TransformError::InvalidParameters(
                "paper alpha and splotch settings require a paper color".to_string(),
            ));
        }
        Ok(())
    }
}

#[inline]
fn blend_channel(c: u8, paper: u8, alpha: f64, shade: f64) -> u8 {
    let mixed = (c as f64 * (1.0 - alpha) + paper as f64 * alpha) * shade;
    mixed.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn blend(px: Rgb, paper: Rgb, alpha: f64, shade: f64) -> Rgb {
    Rgb::new(
        blend_channel(px.r, paper.r, alpha, shade),
        blend_channel(px.g, paper.g, alpha, shade),
        blend_channel(px.b, paper.b, alpha, shade),
    )
}

/// Random byte grid covering the image with one spare cell on each far edge.
struct SplotchField {
    cell: u64,
    grid_w: u64,
    grid_h: u64,
    values: Vec<u8>,
}

impl SplotchField {
    fn new(width: u32, height: u32, cell: u32, seed: i32) -> Self {
        let cell = cell.max(1) as u64;
        let grid_w = width as u64 / cell + 2;
        let grid_h = height as u64 / cell + 2;
        let mut rng = XorShift32::new(seed, PAPER_TINT_SALT);
        let values = (0..grid_w * grid_h).map(|_| rng.next_u8()).collect();
        Self {
            cell,
            grid_w,
            grid_h,
            values,
        }
    }

    /// Interpolated field value at a pixel, in `[0, 1]`.
    fn at(&self, x: u32, y: u32) -> f64 {
        let (gx, rx) = self.split(x as u64, self.grid_w);
        let (gy, ry) = self.split(y as u64, self.grid_h);

        let idx00 = (gy * self.grid_w + gx) as usize;
        let idx10 = idx00 + 1;
        let idx01 = idx00 + self.grid_w as usize;
        let idx11 = idx01 + 1;

        let (wx0, wx1) = ((self.cell - rx) as u128, rx as u128);
        let (wy0, wy1) = ((self.cell - ry) as u128, ry as u128);
        let acc = self.values[idx00] as u128 * wx0 * wy0
            + self.values[idx10] as u128 * wx1 * wy0
            + self.values[idx01] as u128 * wx0 * wy1
            + self.values[idx11] as u128 * wx1 * wy1;
        let denom = (self.cell as u128 * self.cell as u128) as f64 * 255.0;
        (acc as f64 / denom).clamp(0.0, 1.0)
    }

    /// Grid cell and remainder for a pixel coordinate.
    #[inline]
    fn split(&self, pos: u64, grid_len: u64) -> (u64, u64) {
        let g = pos / self.cell;
        let r = pos - g * self.cell;
        (g.min(grid_len - 2), r)
    }
}

/// Blend an image toward a paper color.
///
/// Factors are clamped to `[0, 1]`. Returns a copy when the tint has no
/// color or all factors are non-positive. With `splotch_px <= 0` every
/// pixel is blended uniformly by `alpha`; otherwise the splotch field
/// drawn from `seed` modulates blend and shade per pixel.
pub fn apply_paper_tint(image: &Image, tint: &PaperTint, seed: i32) -> Image {
    let mut out = image.clone();
    let Some(paper) = tint.color else {
        return out;
    };
    for (name, v) in [
        ("alpha", tint.alpha),
        ("splotch alpha", tint.splotch_alpha),
        ("splotch shade", tint.splotch_shade),
    ] {
        if v > 1.0 {
            log::warn!("paper {} {} clamped to 1", name, v);
        }
    }
    let alpha = clamp_unit(tint.alpha);
    let splotch_alpha = clamp_unit(tint.splotch_alpha);
    let splotch_shade = clamp_unit(tint.splotch_shade);
    if alpha <= 0.0 && splotch_alpha <= 0.0 && splotch_shade <= 0.0 {
        return out;
    }

    let (w, h) = image.dimensions();
    if tint.splotch_px <= 0 {
        for y in 0..h {
            for x in 0..w {
                let px = image.get_pixel_unchecked(x, y);
                out.set_pixel_unchecked(x, y, blend(px, paper, alpha, 1.0));
            }
        }
        log::debug!("uniform paper tint {} alpha {} on {}x{}", paper.to_hex(), alpha, w, h);
        return out;
    }

    let field = SplotchField::new(w, h, tint.splotch_px as u32, seed);
    for y in 0..h {
        for x in 0..w {
            let n = field.at(x, y);
            let a = clamp_unit(alpha + splotch_alpha * n);
            let shade = clamp_unit(1.0 - splotch_shade * n);
            let px = image.get_pixel_unchecked(x, y);
            out.set_pixel_unchecked(x, y, blend(px, paper, a, shade));
        }
    }

    log::debug!(
        "splotched paper tint {} on {}x{}: cell {}, grid {}x{}",
        paper.to_hex(),
        w,
        h,
        field.cell,
        field.grid_w,
        field.grid_h
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_inactive() {
        let img = Image::filled(6, 4, Rgb::new(10, 20, 30)).unwrap();
        assert_eq!(apply_paper_tint(&img, &PaperTint::default().alpha(0.5), 1), img);
        let zero = PaperTint::with_color(Rgb::WHITE);
        assert_eq!(apply_paper_tint(&img, &zero, 1), img);
        assert!(!zero.is_active());
    }

    #[test]
    fn test_validate() {
        assert!(PaperTint::default().validate().is_ok());
        assert!(PaperTint::default().splotch_shade(0.2).validate().is_err());
        assert!(PaperTint::with_color(Rgb::BLACK).alpha(0.2).validate().is_ok());
    }

    #[test]
    fn test_uniform_tint() {
        let img = Image::filled(3, 3, Rgb::new(0, 100, 255)).unwrap();
        let tint = PaperTint::with_color(Rgb::new(200, 200, 200)).alpha(0.5);
        let out = apply_paper_tint(&img, &tint, 0);
        assert!(out.iter_pixels().all(|p| p == Rgb::new(100, 150, 228)));
    }

    #[test]
    fn test_uniform_tint_clamps_alpha() {
        let img = Image::filled(2, 2, Rgb::BLACK).unwrap();
        let tint = PaperTint::with_color(Rgb::new(240, 230, 210)).alpha(3.0);
        let out = apply_paper_tint(&img, &tint, 0);
        assert!(out.iter_pixels().all(|p| p == Rgb::new(240, 230, 210)));
    }

    #[test]
    fn test_splotch_deterministic_and_bounded() {
        let img = Image::filled(40, 30, Rgb::WHITE).unwrap();
        let tint = PaperTint::with_color(Rgb::new(230, 220, 190))
            .alpha(0.1)
            .splotch_alpha(0.3)
            .splotch_shade(0.2)
            .splotch_px(8);
        let a = apply_paper_tint(&img, &tint, 42);
        let b = apply_paper_tint(&img, &tint, 42);
        assert_eq!(a, b);
        let c = apply_paper_tint(&img, &tint, 43);
        assert_ne!(a, c);
        // alpha is at least the base 0.1 and shade at most 1
        assert!(a.iter_pixels().all(|p| p.g <= 252 && p.b <= 249));
    }

    #[test]
    fn test_splotch_field_values() {
        let field = SplotchField::new(10, 10, 4, 7);
        assert_eq!(field.grid_w, 4);
        assert_eq!(field.grid_h, 4);
        assert_eq!(field.values.len(), 16);
        // on a grid node the field equals that node's byte
        let expected = field.values[(field.grid_w + 1) as usize] as f64 / 255.0;
        assert!((field.at(4, 4) - expected).abs() < 1e-12);
        for y in 0..10 {
            for x in 0..10 {
                let n = field.at(x, y);
                assert!((0.0..=1.0).contains(&n));
            }
        }
    }
}
