//! CSS color strings for discrete UI colors.
//!
//! Element `color` / `background-color` values arrive as computed-style
//! strings. They are parsed into [`Rgba`] samples, transformed like any
//! pixel, and written back as `rgba(...)`.

use crate::error::Result;
use crate::sample::Rgba;
use crate::transform::batch::apply_to_buffer;
use crate::transform::evaluate::{PreparedTransform, SampleTransform};
use crate::transform::params::{TransformConfig, TransformMode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex length")]
    InvalidLength,
    #[error("invalid hex digits")]
    InvalidHex,
    #[error("invalid rgb()/rgba() function")]
    InvalidFunc,
    #[error("component out of range")]
    OutOfRange,
}

/// Parse a CSS color.
///
/// Accepted forms:
/// * `transparent` (as `rgba(0, 0, 0, 0)`)
/// * `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
/// * `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// * `rgb(r g b)`, `rgb(r g b / a)`
///
/// Channels may be numbers in 0–255 or percentages; alpha may be a number
/// in 0–1 or a percentage.
pub fn parse_color(s: &str) -> std::result::Result<Rgba, ColorParseError> {
    use ColorParseError::*;

    let s = s.trim();
    if s.is_empty() {
        return Err(Empty);
    }
    if s.eq_ignore_ascii_case("transparent") {
        return Ok(Rgba::new(0, 0, 0, 0));
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or(InvalidFunc)?;
    parse_rgb_args(args)
}

fn parse_hex(hex: &str) -> std::result::Result<Rgba, ColorParseError> {
    use ColorParseError::*;

    let nibble = |c: u8| -> std::result::Result<u8, ColorParseError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(InvalidHex),
        }
    };
    let bytes = hex.as_bytes();

    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|&c| nibble(c).map(|n| n * 17))
            .collect::<std::result::Result<Vec<u8>, ColorParseError>>()?,
        6 | 8 => bytes
            .chunks(2)
            .map(|pair| -> std::result::Result<u8, ColorParseError> {
                Ok(nibble(pair[0])? << 4 | nibble(pair[1])?)
            })
            .collect::<std::result::Result<Vec<u8>, ColorParseError>>()?,
        _ => return Err(InvalidLength),
    };

    let a = channels.get(3).copied().unwrap_or(255);
    Ok(Rgba::new(channels[0], channels[1], channels[2], a))
}

fn parse_rgb_args(args: &str) -> std::result::Result<Rgba, ColorParseError> {
    use ColorParseError::*;

    let parts: Vec<&str> = if args.contains(',') {
        args.split(',').map(str::trim).collect()
    } else {
        // Space-separated syntax with optional "/ alpha".
        let (rgb, alpha) = match args.split_once('/') {
            Some((rgb, alpha)) => (rgb, Some(alpha.trim())),
            None => (args, None),
        };
        rgb.split_whitespace().chain(alpha).collect()
    };

    let (rgb, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], None),
        [r, g, b, a] => ([*r, *g, *b], Some(*a)),
        _ => return Err(InvalidFunc),
    };

    let channel = |t: &str| -> std::result::Result<u8, ColorParseError> {
        let v = parse_component(t, 255.0)?;
        if !(0.0..=255.0).contains(&v) {
            return Err(OutOfRange);
        }
        Ok(v.round() as u8)
    };
    let a = match alpha {
        Some(t) => {
            let v = parse_component(t, 1.0)?;
            if !(0.0..=1.0).contains(&v) {
                return Err(OutOfRange);
            }
            (v * 255.0).round() as u8
        }
        None => 255,
    };

    Ok(Rgba::new(channel(rgb[0])?, channel(rgb[1])?, channel(rgb[2])?, a))
}

/// A number, or a percentage of `full`.
fn parse_component(t: &str, full: f64) -> std::result::Result<f64, ColorParseError> {
    let (num, scale) = match t.strip_suffix('%') {
        Some(pct) => (pct, full / 100.0),
        None => (t, 1.0),
    };
    let v: f64 = num.trim().parse().map_err(|_| ColorParseError::InvalidFunc)?;
    if !v.is_finite() {
        return Err(ColorParseError::OutOfRange);
    }
    Ok(v * scale)
}

/// Format a sample as `rgba(r, g, b, a)` with alpha in 0–1.
pub fn format_rgba(c: Rgba) -> String {
    let alpha = format!("{:.3}", c.a as f64 / 255.0);
    let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, alpha)
}

/// Parse, transform and re-format one CSS color.
///
/// A numeric fault in the transform leaves the color unchanged.
pub fn transform_color(s: &str, config: &TransformConfig, mode: TransformMode) -> Result<String> {
    let sample = parse_color(s)?;
    let transform = PreparedTransform::new(config, mode)?;
    let out = transform.transform(sample).unwrap_or_else(|e| {
        tracing::trace!("color {s} kept as input: {e}");
        sample
    });
    Ok(format_rgba(out))
}

/// Transform a list of CSS colors, preserving order.
pub fn transform_colors<S: AsRef<str>>(
    colors: &[S],
    config: &TransformConfig,
    mode: TransformMode,
) -> Result<Vec<String>> {
    let samples = colors
        .iter()
        .map(|c| parse_color(c.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let out = apply_to_buffer(&samples, config, mode)?;
    Ok(out.into_iter().map(format_rgba).collect())
}
