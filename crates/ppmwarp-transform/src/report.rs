//! Geometry diagnostics
//!
//! Values describing what the pipeline did to the image geometry. They
//! are computed here as plain numbers and turned into header comment
//! lines by the caller that writes the file.

/// Record of a horizontal shear, describing where the original content
/// sits in the widened canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearReport {
    /// Width of the image entering the shear
    pub src_width: u32,
    /// Height of the image entering the shear
    pub src_height: u32,
    /// The applied horizontal shear amount in pixels
    pub skew_x: f64,
}

impl ShearReport {
    /// Create a report for a shear of `skew_x` applied to a `src_width x src_height` image.
    pub fn new(src_width: u32, src_height: u32, skew_x: f64) -> Self {
        Self {
            src_width,
            src_height,
            skew_x,
        }
    }

    /// Left offset of the top row in the output canvas.
    ///
    /// Zero for positive shear; `-skew_x` for negative shear.
    pub fn margin_x(&self) -> f64 {
        -self.skew_x.min(0.0)
    }

    /// Shift of the top row relative to the unsheared image (always 0).
    pub fn top_x(&self) -> f64 {
        0.0
    }

    /// Shift of the bottom row relative to the top row.
    pub fn bottom_x(&self) -> f64 {
        self.skew_x
    }
}

/// Estimate the blank margin a rotation introduced.
///
/// The four corners of the `src_w x src_h` source are rotated forward by
/// `degrees` about the source center and placed relative to the center
/// of the `dst_w x dst_h` canvas. The result is the mean of the
/// non-negative leftmost x and topmost y among those corners.
///
/// Purely diagnostic; it never affects pixels.
pub fn rotation_margin(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, degrees: f64) -> f64 {
    let (sin_a, cos_a) = degrees.to_radians().sin_cos();
    let cx = (src_w as f64 - 1.0) / 2.0;
    let cy = (src_h as f64 - 1.0) / 2.0;
    let ncx = (dst_w as f64 - 1.0) / 2.0;
    let ncy = (dst_h as f64 - 1.0) / 2.0;
    let max_x = (src_w as f64 - 1.0).max(0.0);
    let max_y = (src_h as f64 - 1.0).max(0.0);

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for (x, y) in [(0.0, 0.0), (max_x, 0.0), (0.0, max_y), (max_x, max_y)] {
        let rx = x - cx;
        let ry = y - cy;
        min_x = min_x.min(cos_a * rx - sin_a * ry + ncx);
        min_y = min_y.min(sin_a * rx + cos_a * ry + ncy);
    }

    (min_x.max(0.0) + min_y.max(0.0)) / 2.0
}
