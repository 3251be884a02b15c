//! RGB color triplets and color-string parsing
//!
//! Colors arrive on the command line either as a name (`White`, `Black`,
//! case-insensitive) or as six hex digits with an optional leading `#`.
//! Plain decimal triplets (`"R G B"`) are accepted by [`parse_rgb_triplet`].

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure white (the background of every enlarged canvas)
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Pure black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Gray color with all three channels equal to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Rgb { r: v, g: v, b: v }
    }

    /// Components as an array in `R, G, B` order.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Whether all three channels are equal.
    #[inline]
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Pack into `0x00RRGGBB`.
    #[inline]
    pub fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Upper-case hex form without `#`, e.g. `FF8000`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `White`, `Black` or `[#]RRGGBB`.
    ///
    /// Surrounding blanks are ignored; an empty string is an error (use
    /// [`parse_color`] when "no color" is acceptable).
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim_matches(|c: char| c == ' ' || c == '\t');
        if text.eq_ignore_ascii_case("white") {
            return Ok(Rgb::WHITE);
        }
        if text.eq_ignore_ascii_case("black") {
            return Ok(Rgb::BLACK);
        }

        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
    }
}

/// Parse an optional color argument.
///
/// Returns `Ok(None)` for an empty (or all-blank) string.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for any other string that is not a
/// recognized name or hex value.
pub fn parse_color(text: &str) -> Result<Option<Rgb>> {
    if text.trim_matches(|c: char| c == ' ' || c == '\t').is_empty() {
        return Ok(None);
    }
    text.parse().map(Some)
}

/// Parse a decimal `"R G B"` triplet.
///
/// Extra tokens after the third are ignored. Returns `None` if fewer than
/// three integers are present or a value falls outside `[0, 255]`.
pub fn parse_rgb_triplet(text: &str) -> Option<Rgb> {
    let mut tokens = text.split_whitespace();
    let mut next = || -> Option<u8> {
        let v: i64 = tokens.next()?.parse().ok()?;
        u8::try_from(v).ok()
    };
    let r = next()?;
    let g = next()?;
    let b = next()?;
    Some(Rgb::new(r, g, b))
}
