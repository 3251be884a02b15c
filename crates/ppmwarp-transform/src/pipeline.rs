//! The fixed-order distortion pipeline
//!
//! Stage order: scale, horizontal shear, vertical shear, rotate, border
//! noise, ink blot, paper tint. Every stage is skipped (copied through)
//! when its parameters are neutral, so the default parameters return the
//! input unchanged.

use crate::blot::apply_ink_blot;
use crate::noise::add_border_noise;
use crate::report::{ShearReport, rotation_margin};
use crate::rotate::rotate;
use crate::scale::scale;
use crate::shear::{shear_horizontal, shear_vertical};
use crate::tint::{PaperTint, apply_paper_tint};
use crate::{TransformError, TransformResult, nearly_equal};
use ppmwarp_core::{Image, Rgb};

/// Default probability that a border pixel is speckled
pub const DEFAULT_BORDER_DENSITY: f64 = 0.35;

/// Parameters for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct TransformParams {
    /// Horizontal scale factor
    pub scale_x: f64,
    /// Vertical scale factor
    pub scale_y: f64,
    /// Horizontal shear in pixels (bottom row relative to top row)
    pub skew_x: f64,
    /// Vertical shear in pixels (right column relative to left column)
    pub skew_y: f64,
    /// Rotation in degrees
    pub rotate_deg: f64,
    /// Width of the noisy border band (non-positive = off)
    pub border_thickness: i32,
    /// Probability that a band pixel is speckled
    pub border_density: f64,
    /// Seed for every random stage
    pub seed: i32,
    /// Ink blot radius in pixels (non-positive = off)
    pub ink_blot_radius: i32,
    /// Ink blot color
    pub ink_blot_color: Option<Rgb>,
    /// Paper tint settings
    pub paper_tint: PaperTint,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            rotate_deg: 0.0,
            border_thickness: 0,
            border_density: DEFAULT_BORDER_DENSITY,
            seed: 0,
            ink_blot_radius: 0,
            ink_blot_color: None,
            paper_tint: PaperTint::default(),
        }
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// The distorted image
    pub image: Image,
    /// Present when a horizontal shear was applied
    pub shear_report: Option<ShearReport>,
    /// Blank margin estimate from the rotation stage (0 without rotation)
    pub rotation_margin: f64,
}

impl TransformParams {
    /// Set both scale factors
    pub fn scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale_x = sx;
        self.scale_y = sy;
        self
    }

    /// Set the horizontal shear
    pub fn skew_x(mut self, skew_x: f64) -> Self {
        self.skew_x = skew_x;
        self
    }

    /// Set the vertical shear
    pub fn skew_y(mut self, skew_y: f64) -> Self {
        self.skew_y = skew_y;
        self
    }

    /// Set the rotation angle in degrees
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate_deg = degrees;
        self
    }

    /// Set the border noise band
    pub fn border(mut self, thickness: i32, density: f64) -> Self {
        self.border_thickness = thickness;
        self.border_density = density;
        self
    }

    /// Set the seed
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the ink blot
    pub fn ink_blot(mut self, radius: i32, color: Option<Rgb>) -> Self {
        self.ink_blot_radius = radius;
        self.ink_blot_color = color;
        self
    }

    /// Set the paper tint
    pub fn paper_tint(mut self, tint: PaperTint) -> Self {
        self.paper_tint = tint;
        self
    }

    /// Check parameter combinations that cannot be honored.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameters`] for a positive ink
    /// blot radius without a color, or paper tint strength without a
    /// paper color.
    pub fn validate(&self) -> TransformResult<()> {
        if self.ink_blot_radius > 0 && self.ink_blot_color.is_none() {
            return Err(TransformError::InvalidParameters(
                "ink blot radius requires an ink blot color".to_string(),
            ));
        }
        self.paper_tint.validate()
    }

    /// Run every stage on `image`.
    ///
    /// # Errors
    ///
    /// Fails only when [`validate`](Self::validate) fails; the stages
    /// themselves are total.
    pub fn run(&self, image: &Image) -> TransformResult<TransformOutput> {
        self.validate()?;

        let mut current = scale(image, self.scale_x, self.scale_y);

        let shear_report = if nearly_equal(self.skew_x, 0.0) {
            None
        } else {
            Some(ShearReport::new(
                current.width(),
                current.height(),
                self.skew_x,
            ))
        };
        current = shear_horizontal(&current, self.skew_x);
        current = shear_vertical(&current, self.skew_y);

        let (pre_w, pre_h) = current.dimensions();
        current = rotate(&current, self.rotate_deg);
        let margin = if nearly_equal(self.rotate_deg, 0.0) {
            0.0
        } else {
            rotation_margin(pre_w, pre_h, current.width(), current.height(), self.rotate_deg)
        };
        log::trace!("rotation margin {:.3}", margin);

        current = add_border_noise(&current, self.border_thickness, self.border_density, self.seed);
        current = apply_ink_blot(&current, self.ink_blot_radius, self.ink_blot_color);
        current = apply_paper_tint(&current, &self.paper_tint, self.seed);

        log::debug!(
            "pipeline {}x{} -> {}x{}",
            image.width(),
            image.height(),
            current.width(),
            current.height()
        );

        Ok(TransformOutput {
            image: current,
            shear_report,
            rotation_margin: margin,
        })
    }
}
