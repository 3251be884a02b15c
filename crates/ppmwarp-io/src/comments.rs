//! Header comment handling
//!
//! P3 comment lines double as a small metadata channel: the transform
//! pipeline appends diagnostic lines describing the geometry it applied,
//! and encoders upstream mark the footer stripe height. This module owns
//! the textual side of that channel.

/// Comment prefixes written by a previous horizontal shear.
///
/// Lines starting with any of these (after leading blanks) are dropped
/// before new diagnostics are appended, so repeated runs never
/// accumulate stale geometry.
pub const GEOMETRY_COMMENT_PREFIXES: [&str; 5] = [
    "# skew_src_width",
    "# skew_src_height",
    "# skew_margin_x",
    "# skew_x_pixels",
    "# skew_bottom_x",
];

/// Marker naming the number of footer rows in an encoded image.
pub const FOOTER_ROWS_TAG: &str = "MAKOCODE_FOOTER_ROWS";

/// Drop geometry diagnostic lines, keeping everything else in order.
pub fn strip_geometry_comments(comments: &[String]) -> Vec<String> {
    comments
        .iter()
        .filter(|line| {
            let s = line.trim_start_matches([' ', '\t']);
            !GEOMETRY_COMMENT_PREFIXES.iter().any(|p| s.starts_with(p))
        })
        .cloned()
        .collect()
}

/// Format a float for a comment line.
///
/// Six fixed decimals, then trailing zeros and a trailing `.` are
/// removed. Negative zero (including values that round to it) prints
/// as `0`.
///
/// # Examples
///
/// ```
/// use ppmwarp_io::format_float;
///
/// assert_eq!(format_float(2.5), "2.5");
/// assert_eq!(format_float(-3.0), "-3");
/// assert_eq!(format_float(-0.0), "0");
/// ```
pub fn format_float(value: f64) -> String {
    let mut out = format!("{value:.6}");
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

/// Footer row count declared by a `# MAKOCODE_FOOTER_ROWS n` comment.
///
/// Only the first line carrying the tag is considered. Returns 0 when
/// no such line exists or its value does not start with an integer.
pub fn footer_rows_from_comments(comments: &[String]) -> i32 {
    for line in comments {
        let s = line.strip_prefix('#').unwrap_or(line).trim_start();
        let Some(rest) = s.strip_prefix(FOOTER_ROWS_TAG) else {
            continue;
        };
        return leading_int(rest.trim_start()).unwrap_or(0);
    }
    0
}

/// Parse an optionally signed run of digits at the start of `s`.
fn leading_int(s: &str) -> Option<i32> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}
