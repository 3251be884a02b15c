//! ppmwarp-io - Plain-text P3 image I/O
//!
//! Reads and writes ASCII PPM (`P3`, maxval 255) files, preserving header
//! comment lines, and provides helpers for the diagnostic comments the
//! transform pipeline emits.
//!
//! # Example
//!
//! ```no_run
//! use ppmwarp_io::{WriteOptions, read_image, write_image};
//!
//! let ppm = read_image("input.ppm").unwrap();
//! write_image("output.ppm", &ppm.comments, &ppm.image, &WriteOptions::default()).unwrap();
//! ```

pub mod comments;
mod error;
pub mod pnm;

pub use comments::{
    FOOTER_ROWS_TAG, GEOMETRY_COMMENT_PREFIXES, footer_rows_from_comments, format_float,
    strip_geometry_comments,
};
pub use error::{IoError, IoResult};
pub use pnm::{PixelLayout, Ppm, WriteOptions, read_ppm, read_ppm_mem, write_ppm, write_ppm_mem};

use ppmwarp_core::Image;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a P3 file from disk.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened, or any of the
/// format errors from [`read_ppm`].
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Ppm> {
    let path = path.as_ref();
    let file = File::open(path)?;
    log::debug!("reading {}", path.display());
    read_ppm(BufReader::new(file))
}

/// Write an image with header comments to disk as P3.
///
/// # Arguments
/// * `path`     - Output file path (truncated if it exists)
/// * `comments` - Comment lines, each expected to start with `#`
/// * `image`    - The image to write
/// * `options`  - Layout and directory creation options
pub fn write_image<P: AsRef<Path>>(
    path: P,
    comments: &[String],
    image: &Image,
    options: &WriteOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    if options.create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    log::debug!(
        "writing {}x{} P3 ({:?}) to {}",
        image.width(),
        image.height(),
        options.layout,
        path.display()
    );
    write_ppm(comments, image, options.layout, BufWriter::new(file))
}
