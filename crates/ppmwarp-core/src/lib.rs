//! ppmwarp Core - Basic data structures for image distortion
//!
//! This crate provides the fundamental types shared by the other
//! ppmwarp crates:
//!
//! - [`Image`] - Dense 8-bit RGB raster (row-major `R,G,B` triplets)
//! - [`Rgb`] - A single color triplet, parseable from names and hex strings
//! - [`XorShift32`] - Small explicitly seeded generator used by the noise stages

pub mod error;
pub mod image;
pub mod rgb;
pub mod rng;

pub use error::{Error, Result};
pub use image::{CHANNELS, Image, MAX_CHANNEL_VALUE};
pub use rgb::{Rgb, parse_color, parse_rgb_triplet};
pub use rng::XorShift32;
