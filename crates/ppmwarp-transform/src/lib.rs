//! ppmwarp-transform - Deterministic image distortions
//!
//! This crate provides the stages of the distortion pipeline:
//!
//! - Bilinear resampling scale with independent axis factors
//! - Horizontal and vertical shear (scatter, canvas grows to fit)
//! - Rotation about the image center onto an expanded white canvas
//! - Seeded grayscale speckle noise in a border band
//! - A solid ink blot centered on the image
//! - An optional paper tint with a seeded splotch field
//!
//! Each stage takes `&Image` and returns a new `Image`. [`TransformParams`]
//! chains them in a fixed order.
//!
//! # Example
//!
//! ```
//! use ppmwarp_core::{Image, Rgb};
//! use ppmwarp_transform::TransformParams;
//!
//! let img = Image::filled(40, 30, Rgb::BLACK).unwrap();
//! let params = TransformParams::default().rotate(10.0).skew_x(4.0);
//! let out = params.run(&img).unwrap();
//! assert!(out.image.width() > 40);
//! ```

pub mod blot;
mod error;
pub mod noise;
pub mod pipeline;
pub mod report;
pub mod rotate;
pub mod sampler;
pub mod scale;
pub mod shear;
pub mod tint;

pub use blot::apply_ink_blot;
pub use error::{TransformError, TransformResult};
pub use noise::{BORDER_NOISE_SALT, add_border_noise};
pub use pipeline::{DEFAULT_BORDER_DENSITY, TransformOutput, TransformParams};
pub use report::{ShearReport, rotation_margin};
pub use rotate::{rotate, rotated_dimensions};
pub use sampler::sample_bilinear;
pub use scale::{scale, scaled_dimensions};
pub use shear::{shear_horizontal, shear_vertical};
pub use tint::{PAPER_TINT_SALT, PaperTint, apply_paper_tint};

/// Tolerance below which a factor, amount or angle counts as "no change".
pub const EPSILON: f64 = 1e-9;

/// Whether `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub(crate) fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
