//! RGBA sample representation shared by every transform.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// One 8-bit RGBA color: an image pixel or a resolved CSS color.
///
/// Layout matches canvas `ImageData` and `image::Rgba<u8>`, so flat byte
/// buffers can be reinterpreted as `&[Rgba]` without copying.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity. Never altered by a transform.
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `true` when all three color channels are equal (black, white and
    /// every gray in between).
    pub const fn is_achromatic(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Color channels as `f64` on the 0–255 scale.
    pub fn rgb_f64(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Build a sample from 0–255 floats, clamping and truncating each
    /// channel. NaN maps to 0.
    pub fn from_rgb_f64(rgb: [f64; 3], a: u8) -> Self {
        let channel = |v: f64| -> u8 {
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, 255.0) as u8
            }
        };
        Self {
            r: channel(rgb[0]),
            g: channel(rgb[1]),
            b: channel(rgb[2]),
            a,
        }
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba(c.into())
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
