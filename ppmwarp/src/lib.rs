//! ppmwarp - Deterministic distortion of plain-text PPM images
//!
//! Produces controlled "scanned document" degradations of P3 images:
//! scale, shear, rotation, border speckle, ink blots and paper tint,
//! plus the fixture generators, footer corruptors and overlay checks
//! used when testing decoders against such images.
//!
//! # Example
//!
//! ```
//! use ppmwarp::transform::TransformParams;
//! use ppmwarp::{Image, Rgb};
//!
//! let img = Image::filled(20, 10, Rgb::BLACK).unwrap();
//! let out = TransformParams::default().scale(2.0, 2.0).run(&img).unwrap();
//! assert_eq!(out.image.dimensions(), (40, 20));
//! ```

pub mod cli;
pub mod commands;
mod error;

pub use error::{CliError, CliResult};

// Core types are used everywhere
pub use ppmwarp_core::*;

// Domain crates as modules to avoid name conflicts
pub use ppmwarp_io as io;
pub use ppmwarp_transform as transform;
