//! Image - The dense RGB raster container
//!
//! # Pixel layout
//!
//! - One byte per channel, three channels per pixel, in `R, G, B` order
//! - Pixels are stored row-major, top row first
//! - `pixels().len() == width * height * 3` always holds
//!
//! # Ownership model
//!
//! Every transform stage takes `&Image` and returns a freshly allocated
//! `Image`; no stage ever aliases the buffer of its input.

use crate::error::{Error, Result};
use crate::rgb::Rgb;

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Largest channel value (the P3 `maxval`).
pub const MAX_CHANNEL_VALUE: u8 = 255;

/// Dense 8-bit RGB image.
///
/// # Examples
///
/// ```
/// use ppmwarp_core::{Image, Rgb};
///
/// let img = Image::filled(4, 3, Rgb::WHITE).unwrap();
/// assert_eq!(img.width(), 4);
/// assert_eq!(img.pixels().len(), 4 * 3 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Create a new black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create a new image with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self::canvas(width, height, color))
    }

    /// Create a canvas of the given size filled with `color`.
    ///
    /// Unlike [`Image::filled`] this never fails: a zero dimension is
    /// raised to 1, so transform stages can allocate output without
    /// an error path.
    pub fn canvas(width: u32, height: u32, color: Rgb) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&color.channels());
        }
        Image {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an existing channel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if a dimension is 0 and
    /// [`Error::BufferLength`] if `pixels.len() != width * height * 3`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Image {
            width,
            height,
            pixels,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the raw channel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get mutable access to the raw channel data.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Byte offset of the first channel of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Check whether `(x, y)` lies inside the image.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Get the color at `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the color at `(x, y)` without a bounds check on the coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies past the end of the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    /// Set the color at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if !self.contains(x, y) {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_pixel_unchecked(x, y, color);
        Ok(())
    }

    /// Set the color at `(x, y)` without a bounds check on the coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies past the end of the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Rgb) {
        let i = self.offset(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&color.channels());
    }

    /// Channel data of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Mutable channel data of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }

    /// Iterate over all pixels in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
    }

    /// Count the pixels whose color differs between two images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn count_differing_pixels(&self, other: &Image) -> Result<usize> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(self
            .pixels
            .chunks_exact(CHANNELS)
            .zip(other.pixels.chunks_exact(CHANNELS))
            .filter(|(a, b)| a != b)
            .count())
    }
}
