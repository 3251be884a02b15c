//! P3 (plain-text PPM) format support
//!
//! Reads and writes ASCII `P3` files with maxval 255. Comment lines are
//! preserved and handed back to the caller so they can be carried over
//! to the output file.
//!
//! # Layout
//!
//! ```text
//! P3
//! # any number of comment lines
//! <width> <height>
//! 255
//! R G B
//! R G B
//! ...
//! ```

use crate::{IoError, IoResult};
use ppmwarp_core::{CHANNELS, Image, MAX_CHANNEL_VALUE};
use std::io::{BufRead, Write};

/// Signature token on the first line.
pub const P3_MAGIC: &str = "P3";

/// The only supported maxval.
pub const P3_MAXVAL: i64 = MAX_CHANNEL_VALUE as i64;

/// A decoded P3 file: header comments plus the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ppm {
    /// Comment lines (each starting with `#`), trimmed, in file order
    pub comments: Vec<String>,
    /// Decoded pixels
    pub image: Image,
}

/// How pixel values are laid out in the written body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    /// One `R G B` triplet per line
    #[default]
    Triplets,
    /// One image row per line, values separated by single spaces
    Rows,
}

/// Options for writing P3 files
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Body layout
    pub layout: PixelLayout,
    /// Create missing parent directories of the output path
    pub create_dirs: bool,
}

impl WriteOptions {
    /// Create options with a specific layout
    pub fn with_layout(layout: PixelLayout) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    /// Set whether parent directories are created
    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

/// Header fields in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderField {
    Width,
    Height,
    Maxval,
    Done,
}

/// Channel values for a `width x height` image, or `None` if a dimension
/// is out of range or the count does not fit in `usize`.
fn channel_count(width: i64, height: i64) -> Option<usize> {
    let w = u32::try_from(width).ok().filter(|&w| w > 0)?;
    let h = u32::try_from(height).ok().filter(|&h| h > 0)?;
    (w as usize).checked_mul(h as usize)?.checked_mul(CHANNELS)
}

/// Read a P3 image from a reader.
///
/// Blank lines are skipped and `#` lines anywhere in the file are
/// collected as comments.
///
/// # Errors
///
/// Returns [`IoError::NotP3`], [`IoError::TruncatedHeader`],
/// [`IoError::InvalidDimensions`], [`IoError::InvalidMaxval`],
/// [`IoError::InvalidToken`], [`IoError::PixelOutOfRange`] or
/// [`IoError::PixelCountMismatch`] for malformed input.
pub fn read_ppm<R: BufRead>(reader: R) -> IoResult<Ppm> {
    let mut lines = reader.lines();

    let first = match lines.next() {
        Some(line) => line?,
        None => return Err(IoError::TruncatedHeader),
    };
    if first.trim() != P3_MAGIC {
        return Err(IoError::NotP3);
    }

    let mut comments = Vec::new();
    let mut field = HeaderField::Width;
    let mut width = 0i64;
    let mut height = 0i64;
    let mut expected = 0usize;
    let mut pixels: Vec<u8> = Vec::new();

    for line in lines {
        let line = line?;
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if stripped.starts_with('#') {
            comments.push(stripped.to_string());
            continue;
        }

        for token in stripped.split_whitespace() {
            match field {
                HeaderField::Width => {
                    width = parse_int(token, "width")?;
                    field = HeaderField::Height;
                }
                HeaderField::Height => {
                    height = parse_int(token, "height")?;
                    expected = channel_count(width, height)
                        .ok_or(IoError::InvalidDimensions { width, height })?;
                    field = HeaderField::Maxval;
                }
                HeaderField::Maxval => {
                    let maxval = parse_int(token, "maxval")?;
                    if maxval != P3_MAXVAL {
                        return Err(IoError::InvalidMaxval(maxval));
                    }
                    field = HeaderField::Done;
                }
                HeaderField::Done => {
                    let v = parse_int(token, "pixel")?;
                    let v = u8::try_from(v).map_err(|_| IoError::PixelOutOfRange(v))?;
                    pixels.push(v);
                }
            }
        }
    }

    if field != HeaderField::Done {
        return Err(IoError::TruncatedHeader);
    }

    if pixels.len() != expected {
        return Err(IoError::PixelCountMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let image = Image::from_pixels(width as u32, height as u32, pixels)?;
    log::debug!(
        "read P3 {}x{} with {} comment line(s)",
        image.width(),
        image.height(),
        comments.len()
    );
    Ok(Ppm { comments, image })
}

/// Read a P3 image from an in-memory buffer.
pub fn read_ppm_mem(data: &[u8]) -> IoResult<Ppm> {
    read_ppm(data)
}

/// Write an image as P3 to a writer.
///
/// # Arguments
/// * `comments` - Comment lines written verbatim between the signature and the size line
/// * `image`    - The image to encode
/// * `layout`   - Body layout
/// * `writer`   - Destination writer
pub fn write_ppm<W: Write>(
    comments: &[String],
    image: &Image,
    layout: PixelLayout,
    mut writer: W,
) -> IoResult<()> {
    writeln!(writer, "{P3_MAGIC}")?;
    for line in comments {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{P3_MAXVAL}")?;

    match layout {
        PixelLayout::Triplets => {
            for px in image.pixels().chunks_exact(CHANNELS) {
                writeln!(writer, "{} {} {}", px[0], px[1], px[2])?;
            }
        }
        PixelLayout::Rows => {
            for y in 0..image.height() {
                let mut first = true;
                for v in image.row(y) {
                    if !first {
                        writer.write_all(b" ")?;
                    }
                    write!(writer, "{v}")?;
                    first = false;
                }
                writer.write_all(b"\n")?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write an image as P3 into a new byte buffer.
pub fn write_ppm_mem(comments: &[String], image: &Image, layout: PixelLayout) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_ppm(comments, image, layout, &mut buf)?;
    Ok(buf)
}

fn parse_int(token: &str, what: &'static str) -> IoResult<i64> {
    token.parse::<i64>().map_err(|_| IoError::InvalidToken {
        what,
        token: token.to_string(),
    })
}
