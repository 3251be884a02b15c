//! Command line interface
//!
//! One `argh` sub-command struct per command. Each struct's `run`
//! performs the file I/O around the functions in
//! [`commands`](crate::commands).

use crate::commands;
use crate::error::{CliError, CliResult};
use argh::FromArgs;
use ppmwarp_core::{Rgb, parse_color, parse_rgb_triplet};
use ppmwarp_io::{PixelLayout, WriteOptions, read_image, write_image};
use ppmwarp_transform::{DEFAULT_BORDER_DENSITY, PaperTint, TransformParams};
use std::path::PathBuf;

/// Environment variables holding an angular palette for `overlay-mask`,
/// in lookup order. The second name is read by existing encoder scripts.
pub const OVERLAY_CIRCLE_COLORS_ENV: [&str; 2] =
    ["PPMWARP_OVERLAY_CIRCLE_COLORS", "MAKO_OVERLAY_CIRCLE_COLORS"];
/// Environment variables holding the allowed colors for `overlay-check`,
/// in lookup order.
pub const OVERLAY_ALLOWED_COLORS_ENV: [&str; 2] =
    ["PPMWARP_OVERLAY_ALLOWED_COLORS", "MAKO_OVERLAY_ALLOWED_COLORS"];

#[derive(FromArgs, Debug)]
/// Deterministic distortions and test fixtures for plain-text PPM (P3) images.
pub struct Cli {
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Transform(TransformArgs),
    Solid(SolidArgs),
    Noise(NoiseArgs),
    CorruptFooterDataDestroyed(CorruptDestroyedArgs),
    CorruptFooterValidDataTooCorrupt(CorruptTooCorruptArgs),
    OverlayMask(OverlayMaskArgs),
    CopyFooterRows(CopyFooterRowsArgs),
    OverlayCheck(OverlayCheckArgs),
}

impl Cli {
    /// Run the selected sub-command.
    pub fn run(&self) -> CliResult<()> {
        match &self.command {
            Command::Transform(args) => args.run(),
            Command::Solid(args) => args.run(),
            Command::Noise(args) => args.run(),
            Command::CorruptFooterDataDestroyed(args) => args.run(),
            Command::CorruptFooterValidDataTooCorrupt(args) => args.run(),
            Command::OverlayMask(args) => args.run(),
            Command::CopyFooterRows(args) => args.run(),
            Command::OverlayCheck(args) => {
                let stats = args.run()?;
                println!(
                    "overlay pixels modified: {} ({:.6})",
                    stats.modified,
                    stats.ratio()
                );
                Ok(())
            }
        }
    }
}

/// Parse the palette from the first of `names` that `lookup` finds.
fn palette_from_lookup<F>(names: &[&str], lookup: F, what: &str) -> CliResult<Vec<Rgb>>
where
    F: Fn(&str) -> Option<String>,
{
    match names.iter().find_map(|name| lookup(*name)) {
        Some(text) => commands::parse_palette(&text, what),
        None => Ok(Vec::new()),
    }
}

fn palette_from_env(names: &[&str], what: &str) -> CliResult<Vec<Rgb>> {
    palette_from_lookup(names, |name| std::env::var(name).ok(), what)
}

// ============================================================================
// transform
// ============================================================================

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Apply scale, shear, rotation, border noise, ink blot and paper tint.
#[argh(subcommand, name = "transform")]
pub struct TransformArgs {
    /// input P3 file
    #[argh(option)]
    pub input: PathBuf,

    /// output P3 file
    #[argh(option)]
    pub output: PathBuf,

    /// horizontal scale factor
    #[argh(option, default = "1.0")]
    pub scale_x: f64,

    /// vertical scale factor
    #[argh(option, default = "1.0")]
    pub scale_y: f64,

    /// rotation in degrees
    #[argh(option, default = "0.0")]
    pub rotate: f64,

    /// horizontal shear in pixels
    #[argh(option, default = "0.0")]
    pub skew_x: f64,

    /// vertical shear in pixels
    #[argh(option, default = "0.0")]
    pub skew_y: f64,

    /// width of the noisy border band in pixels
    #[argh(option, default = "0")]
    pub border_thickness: i32,

    /// probability that a border pixel is speckled
    #[argh(option, default = "DEFAULT_BORDER_DENSITY")]
    pub border_density: f64,

    /// seed for all random stages
    #[argh(option, default = "0")]
    pub seed: i32,

    /// ink blot radius in pixels
    #[argh(option, default = "0")]
    pub ink_blot_radius: i32,

    /// ink blot color: White, Black or RRGGBB hex
    #[argh(option, default = "String::new()")]
    pub ink_blot_color: String,

    /// paper color: White, Black or RRGGBB hex
    #[argh(option, default = "String::new()")]
    pub paper_color: String,

    /// base blend toward the paper color
    #[argh(option, default = "0.0")]
    pub paper_alpha: f64,

    /// extra blend scaled by the splotch field
    #[argh(option, default = "0.0")]
    pub paper_splotch_alpha: f64,

    /// darkening scaled by the splotch field
    #[argh(option, default = "0.0")]
    pub paper_splotch_shade: f64,

    /// splotch cell size in pixels
    #[argh(option, default = "0")]
    pub paper_splotch_px: i32,
}

impl TransformArgs {
    /// Build pipeline parameters, parsing the color options.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Core`] for an unparseable color and
    /// [`CliError::Usage`] for a radius or paper strength without a color.
    pub fn params(&self) -> CliResult<TransformParams> {
        let ink_color = parse_color(&self.ink_blot_color)?;
        let tint = PaperTint {
            color: parse_color(&self.paper_color)?,
            alpha: self.paper_alpha,
            splotch_alpha: self.paper_splotch_alpha,
            splotch_shade: self.paper_splotch_shade,
            splotch_px: self.paper_splotch_px,
        };

        let params = TransformParams::default()
            .scale(self.scale_x, self.scale_y)
            .skew_x(self.skew_x)
            .skew_y(self.skew_y)
            .rotate(self.rotate)
            .border(self.border_thickness, self.border_density)
            .seed(self.seed)
            .ink_blot(self.ink_blot_radius, ink_color)
            .paper_tint(tint);
        params
            .validate()
            .map_err(|e| CliError::Usage(e.to_string()))?;
        Ok(params)
    }

    pub fn run(&self) -> CliResult<()> {
        let params = self.params()?;
        let ppm = read_image(&self.input)?;
        let out = params.run(&ppm.image)?;
        log::info!(
            "{} {}x{} -> {} {}x{}",
            self.input.display(),
            ppm.image.width(),
            ppm.image.height(),
            self.output.display(),
            out.image.width(),
            out.image.height()
        );
        let comments = commands::transform_comments(
            &ppm.comments,
            out.shear_report.as_ref(),
            &params.paper_tint,
        );
        write_image(&self.output, &comments, &out.image, &WriteOptions::default())?;
        Ok(())
    }
}

// ============================================================================
// Generators
// ============================================================================

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Write a solid-color image.
#[argh(subcommand, name = "solid")]
pub struct SolidArgs {
    /// output P3 file
    #[argh(option)]
    pub output: PathBuf,

    /// image width
    #[argh(option)]
    pub width: i32,

    /// image height
    #[argh(option)]
    pub height: i32,

    /// red channel
    #[argh(option)]
    pub r: i32,

    /// green channel
    #[argh(option)]
    pub g: i32,

    /// blue channel
    #[argh(option)]
    pub b: i32,
}

impl SolidArgs {
    pub fn run(&self) -> CliResult<()> {
        let img = commands::solid_image(self.width, self.height, self.r, self.g, self.b)?;
        write_image(&self.output, &[], &img, &WriteOptions::default())?;
        Ok(())
    }
}

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Write an image of random channel values.
#[argh(subcommand, name = "noise")]
pub struct NoiseArgs {
    /// output P3 file
    #[argh(option)]
    pub output: PathBuf,

    /// image width
    #[argh(option)]
    pub width: i32,

    /// image height
    #[argh(option)]
    pub height: i32,

    /// generator seed
    #[argh(option, default = "0")]
    pub seed: i32,
}

impl NoiseArgs {
    pub fn run(&self) -> CliResult<()> {
        let img = commands::noise_image(self.width, self.height, self.seed)?;
        write_image(&self.output, &[], &img, &WriteOptions::default())?;
        Ok(())
    }
}

// ============================================================================
// Corruptors
// ============================================================================

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Randomize everything above the footer stripe.
#[argh(subcommand, name = "corrupt-footer-data-destroyed")]
pub struct CorruptDestroyedArgs {
    /// input P3 file
    #[argh(option)]
    pub input: PathBuf,

    /// output P3 file
    #[argh(option)]
    pub output: PathBuf,

    /// generator seed
    #[argh(option, default = "424242")]
    pub seed: i32,

    /// footer stripe height in pixels
    #[argh(option, default = "12")]
    pub footer_height_px: i32,
}

impl CorruptDestroyedArgs {
    pub fn run(&self) -> CliResult<()> {
        let mut ppm = read_image(&self.input)?;
        commands::corrupt_footer_data_destroyed(&mut ppm.image, self.seed, self.footer_height_px)?;
        write_image(&self.output, &ppm.comments, &ppm.image, &WriteOptions::default())?;
        Ok(())
    }
}

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Randomize the interior of the data area, keeping a border and the footer.
#[argh(subcommand, name = "corrupt-footer-valid-data-too-corrupt")]
pub struct CorruptTooCorruptArgs {
    /// input P3 file
    #[argh(option)]
    pub input: PathBuf,

    /// output P3 file
    #[argh(option)]
    pub output: PathBuf,

    /// generator seed
    #[argh(option, default = "20251215")]
    pub seed: i32,

    /// footer stripe height in pixels
    #[argh(option, default = "12")]
    pub footer_height_px: i32,

    /// untouched border width in pixels
    #[argh(option, default = "80")]
    pub border_keep: i32,
}

impl CorruptTooCorruptArgs {
    pub fn run(&self) -> CliResult<()> {
        let mut ppm = read_image(&self.input)?;
        commands::corrupt_footer_valid_data_too_corrupt(
            &mut ppm.image,
            self.seed,
            self.footer_height_px,
            self.border_keep,
        )?;
        write_image(&self.output, &ppm.comments, &ppm.image, &WriteOptions::default())?;
        Ok(())
    }
}

// ============================================================================
// Overlays
// ============================================================================

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Write a centered disk on a solid background, with no header comments.
#[argh(subcommand, name = "overlay-mask")]
pub struct OverlayMaskArgs {
    /// output P3 file
    #[argh(option)]
    pub output: PathBuf,

    /// disk color as "R G B"
    #[argh(option)]
    pub circle_color: String,

    /// background color as "R G B"
    #[argh(option)]
    pub background_color: String,

    /// image width
    #[argh(option, default = "1000")]
    pub width: i32,

    /// image height
    #[argh(option, default = "1000")]
    pub height: i32,
}

impl OverlayMaskArgs {
    pub fn run(&self) -> CliResult<()> {
        let circle = parse_rgb_triplet(&self.circle_color)
            .ok_or_else(|| CliError::Usage("overlay-mask invalid --circle-color".to_string()))?;
        let background = parse_rgb_triplet(&self.background_color).ok_or_else(|| {
            CliError::Usage("overlay-mask invalid --background-color".to_string())
        })?;
        let palette = palette_from_env(&OVERLAY_CIRCLE_COLORS_ENV, "circle palette")?;

        let img = commands::overlay_mask(self.width, self.height, circle, background, &palette)?;
        let options = WriteOptions::with_layout(PixelLayout::Rows);
        write_image(&self.output, &[], &img, &options)?;
        Ok(())
    }
}

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Copy the declared footer rows of an encoded image into a merged image.
#[argh(subcommand, name = "copy-footer-rows")]
pub struct CopyFooterRowsArgs {
    /// encoded P3 file carrying a MAKOCODE_FOOTER_ROWS comment
    #[argh(option)]
    pub encoded: PathBuf,

    /// merged P3 file, rewritten in place
    #[argh(option)]
    pub merged: PathBuf,
}

impl CopyFooterRowsArgs {
    pub fn run(&self) -> CliResult<()> {
        let encoded = read_image(&self.encoded)?;
        let mut merged = read_image(&self.merged)?;
        if commands::copy_footer_rows(&encoded, &mut merged)? {
            let options = WriteOptions::with_layout(PixelLayout::Rows);
            write_image(&self.merged, &merged.comments, &merged.image, &options)?;
        }
        Ok(())
    }
}

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Verify that a merged image is the base image with a black/white overlay.
#[argh(subcommand, name = "overlay-check")]
pub struct OverlayCheckArgs {
    /// base P3 file
    #[argh(option)]
    pub base: PathBuf,

    /// merged P3 file
    #[argh(option)]
    pub merged: PathBuf,

    /// nonzero to skip the pure black/white requirement
    #[argh(option, default = "0")]
    pub skip_grayscale: i32,
}

impl OverlayCheckArgs {
    pub fn run(&self) -> CliResult<commands::OverlayStats> {
        let base = read_image(&self.base)?;
        let merged = read_image(&self.merged)?;
        let allowed = palette_from_env(&OVERLAY_ALLOWED_COLORS_ENV, "allowed color")?;
        commands::overlay_check(&base.image, &merged.image, &allowed, self.skip_grayscale != 0)
    }
}
