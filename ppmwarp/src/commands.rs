//! Image generators, corruptors and checks behind the sub-commands
//!
//! Each function works on in-memory images so it can be tested without
//! touching the filesystem; [`cli`](crate::cli) does the file handling.

use crate::error::{CliError, CliResult};
use ppmwarp_core::{Image, Rgb, XorShift32, parse_rgb_triplet};
use ppmwarp_io::{Ppm, footer_rows_from_comments, format_float, strip_geometry_comments};
use ppmwarp_transform::{PaperTint, ShearReport};
use std::f64::consts::PI;
use std::ops::Range;

/// Salt for the `noise` generator stream
pub const NOISE_SALT: u32 = 0x00C0_FFEE;
/// Salt for destroying the data area above the footer
pub const DATA_DESTROYED_SALT: u32 = 0x1234_5678;
/// Salt for corrupting the interior of the data area
pub const TOO_CORRUPT_SALT: u32 = 0xDEAD_BEEF;

// ============================================================================
// Header comments
// ============================================================================

/// Comment lines describing a horizontal shear.
pub fn shear_comment_lines(report: &ShearReport) -> Vec<String> {
    vec![
        format!("# skew_src_width {}", report.src_width),
        format!("# skew_src_height {}", report.src_height),
        format!("# skew_margin_x {}", format_float(report.margin_x())),
        format!("# skew_x_pixels {}", format_float(report.top_x())),
        format!("# skew_bottom_x {}", format_float(report.bottom_x())),
    ]
}

/// Comment lines describing an applied paper tint.
///
/// The unclamped user values are recorded.
pub fn paper_comment_lines(tint: &PaperTint) -> Vec<String> {
    let Some(color) = tint.color else {
        return Vec::new();
    };
    vec![
        format!("# paper_color {}", color.to_hex()),
        format!("# paper_alpha {}", format_float(tint.alpha)),
        format!("# paper_splotch_alpha {}", format_float(tint.splotch_alpha)),
        format!("# paper_splotch_shade {}", format_float(tint.splotch_shade)),
        format!("# paper_splotch_px {}", tint.splotch_px),
    ]
}

/// Header comments for a transformed image.
///
/// Stale geometry lines from the input are dropped, then fresh shear
/// and paper lines are appended in that order.
pub fn transform_comments(
    input: &[String],
    shear: Option<&ShearReport>,
    tint: &PaperTint,
) -> Vec<String> {
    let mut comments = strip_geometry_comments(input);
    if let Some(report) = shear {
        comments.extend(shear_comment_lines(report));
    }
    if tint.is_active() {
        comments.extend(paper_comment_lines(tint));
    }
    comments
}

// ============================================================================
// Generators
// ============================================================================

fn checked_size(width: i32, height: i32, what: &str) -> CliResult<(u32, u32)> {
    if width <= 0 || height <= 0 {
        return Err(CliError::Usage(format!(
            "{what} requires a positive width and height (got {width}x{height})"
        )));
    }
    Ok((width as u32, height as u32))
}

fn checked_channel(v: i32) -> CliResult<u8> {
    u8::try_from(v).map_err(|_| CliError::Usage(format!("solid RGB out of range: {v}")))
}

/// A `width x height` image of one color given as raw integers.
///
/// # Errors
///
/// Returns [`CliError::Usage`] for a non-positive size or a channel
/// outside `[0, 255]`.
pub fn solid_image(width: i32, height: i32, r: i32, g: i32, b: i32) -> CliResult<Image> {
    let (w, h) = checked_size(width, height, "solid")?;
    let color = Rgb::new(checked_channel(r)?, checked_channel(g)?, checked_channel(b)?);
    Ok(Image::filled(w, h, color)?)
}

/// A `width x height` image of independent random channel bytes.
pub fn noise_image(width: i32, height: i32, seed: i32) -> CliResult<Image> {
    let (w, h) = checked_size(width, height, "noise")?;
    let mut img = Image::new(w, h)?;
    let mut rng = XorShift32::new(seed, NOISE_SALT);
    for v in img.pixels_mut() {
        *v = rng.next_u8();
    }
    Ok(img)
}

// ============================================================================
// Corruptors
// ============================================================================

fn randomize_rect(img: &mut Image, xs: Range<u32>, ys: Range<u32>, rng: &mut XorShift32) {
    for y in ys {
        for x in xs.clone() {
            let color = Rgb::new(rng.next_u8(), rng.next_u8(), rng.next_u8());
            img.set_pixel_unchecked(x, y, color);
        }
    }
}

/// Replace every row above the footer stripe with random colors.
///
/// # Errors
///
/// Returns [`CliError::Usage`] unless the image is taller than the footer.
pub fn corrupt_footer_data_destroyed(
    img: &mut Image,
    seed: i32,
    footer_height: i32,
) -> CliResult<()> {
    let (w, h) = img.dimensions();
    if (h as i64) <= footer_height as i64 {
        return Err(CliError::Usage(
            "corrupt-footer-data-destroyed: image too short".to_string(),
        ));
    }
    let stripe_top = (h as i64 - footer_height as i64).min(h as i64) as u32;
    let mut rng = XorShift32::new(seed, DATA_DESTROYED_SALT);
    randomize_rect(img, 0..w, 0..stripe_top, &mut rng);
    log::debug!("randomized rows 0..{} of {}x{}", stripe_top, w, h);
    Ok(())
}

/// Randomize the interior of the data area, keeping a border and the footer.
///
/// The rectangle is `[keep, w - keep) x [keep, h - footer - keep)`, each
/// extent at least one pixel.
///
/// # Errors
///
/// Returns [`CliError::Usage`] unless `h - footer > keep + 1`.
pub fn corrupt_footer_valid_data_too_corrupt(
    img: &mut Image,
    seed: i32,
    footer_height: i32,
    border_keep: i32,
) -> CliResult<()> {
    let (w, h) = img.dimensions();
    let data_bottom = h as i64 - footer_height as i64;
    let keep = border_keep as i64;
    if data_bottom <= keep + 1 {
        return Err(CliError::Usage(
            "corrupt-footer-valid-data-too-corrupt: image too short".to_string(),
        ));
    }
    let y0 = keep;
    let y1 = (data_bottom - keep).max(y0 + 1);
    let x0 = keep;
    let x1 = (w as i64 - keep).max(x0 + 1);

    // Clip to the image; a negative keep or a thin image can reach past it.
    let clip = |v: i64, max: u32| v.clamp(0, max as i64) as u32;
    let xs = clip(x0, w)..clip(x1, w);
    let ys = clip(y0, h)..clip(y1, h);
    log::debug!("randomizing x {:?}, y {:?} of {}x{}", xs, ys, w, h);

    let mut rng = XorShift32::new(seed, TOO_CORRUPT_SALT);
    randomize_rect(img, xs, ys, &mut rng);
    Ok(())
}

// ============================================================================
// Overlays
// ============================================================================

/// Parse a `;`-separated list of `"R G B"` triplets.
///
/// Blank entries are skipped.
///
/// # Errors
///
/// Returns [`CliError::Usage`] naming `what` for an unparseable entry.
pub fn parse_palette(text: &str, what: &str) -> CliResult<Vec<Rgb>> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            parse_rgb_triplet(s)
                .ok_or_else(|| CliError::Usage(format!("invalid {what} entry '{s}'")))
        })
        .collect()
}

/// A disk on a solid background.
///
/// The disk has radius `trunc(width * 0.45)` around the integer center
/// `(width / 2, height / 2)`. With a non-empty `palette` the disk is cut
/// into equal angular segments, one per entry, starting at the positive
/// x axis and turning toward positive y.
pub fn overlay_mask(
    width: i32,
    height: i32,
    circle: Rgb,
    background: Rgb,
    palette: &[Rgb],
) -> CliResult<Image> {
    let (w, h) = checked_size(width, height, "overlay-mask")?;
    let mut img = Image::filled(w, h, background)?;

    let cx = (w / 2) as i64;
    let cy = (h / 2) as i64;
    let radius = (w as f64 * 0.45) as i64;
    let radius_sq = radius * radius;

    for y in 0..h {
        let dy = y as i64 - cy;
        for x in 0..w {
            let dx = x as i64 - cx;
            if dx * dx + dy * dy > radius_sq {
                continue;
            }
            let color = if palette.is_empty() {
                circle
            } else {
                let mut angle = (dy as f64).atan2(dx as f64);
                if angle < 0.0 {
                    angle += 2.0 * PI;
                }
                let segment = (angle / (2.0 * PI) * palette.len() as f64) as usize % palette.len();
                palette[segment]
            };
            img.set_pixel_unchecked(x, y, color);
        }
    }
    Ok(img)
}

/// Copy the footer rows declared in `encoded`'s comments into `merged`.
///
/// Returns `Ok(false)` and leaves `merged` alone when `encoded` declares
/// no footer, or one not smaller than the image. When rows are copied
/// and `merged` has no comments of its own, it takes `encoded`'s.
///
/// # Errors
///
/// Returns [`CliError::Core`] if the two images differ in size.
pub fn copy_footer_rows(encoded: &Ppm, merged: &mut Ppm) -> CliResult<bool> {
    let (w, h) = encoded.image.dimensions();
    if merged.image.dimensions() != (w, h) {
        return Err(ppmwarp_core::Error::DimensionMismatch {
            expected: (w, h),
            actual: merged.image.dimensions(),
        }
        .into());
    }

    let rows = footer_rows_from_comments(&encoded.comments);
    if rows <= 0 || rows as i64 >= h as i64 {
        log::info!("no usable footer row count ({}) for height {}", rows, h);
        return Ok(false);
    }

    for y in h - rows as u32..h {
        merged.image.row_mut(y).copy_from_slice(encoded.image.row(y));
    }
    if merged.comments.is_empty() {
        merged.comments = encoded.comments.clone();
    }
    log::debug!("copied {} footer row(s)", rows);
    Ok(true)
}

/// Outcome of a successful overlay check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStats {
    /// Pixels that differ between base and merged
    pub modified: usize,
    /// Total pixels
    pub total: usize,
}

impl OverlayStats {
    /// Fraction of modified pixels
    pub fn ratio(&self) -> f64 {
        self.modified as f64 / self.total as f64
    }
}

/// Verify that `merged` is `base` with a plausible overlay applied.
///
/// Every merged pixel must be in `allowed` (when non-empty) and, unless
/// `skip_grayscale`, pure black or pure white. At least one pixel must
/// differ from `base`.
///
/// # Errors
///
/// Returns [`CliError::Core`] for mismatched sizes and [`CliError::Check`]
/// for the first violating pixel or an unmodified image.
pub fn overlay_check(
    base: &Image,
    merged: &Image,
    allowed: &[Rgb],
    skip_grayscale: bool,
) -> CliResult<OverlayStats> {
    let modified = base.count_differing_pixels(merged)?;

    let mut allowed_sorted: Vec<u32> = allowed.iter().map(|c| c.to_packed()).collect();
    allowed_sorted.sort_unstable();

    for (i, p) in merged.iter_pixels().enumerate() {
        if !allowed_sorted.is_empty() && allowed_sorted.binary_search(&p.to_packed()).is_err() {
            return Err(CliError::Check(format!(
                "pixel {p} at index {i} not in allowed palette"
            )));
        }
        if !skip_grayscale {
            if !p.is_gray() {
                return Err(CliError::Check(format!(
                    "non-grayscale pixel {p} at index {i}"
                )));
            }
            if p.r != 0 && p.r != 255 {
                return Err(CliError::Check(format!(
                    "pixel {p} is not pure black or white at index {i}"
                )));
            }
        }
    }

    if modified == 0 {
        return Err(CliError::Check("overlay did not modify any pixels".to_string()));
    }
    Ok(OverlayStats {
        modified,
        total: base.width() as usize * base.height() as usize,
    })
}
