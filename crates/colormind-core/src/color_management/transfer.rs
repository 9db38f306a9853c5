//! Gamma transfer functions.
//!
//! Transfer functions convert between non-linear (encoded) and linear light
//! values on the normalized `[0, 1]` scale.

/// A transfer function that converts between linear and non-linear encodings.
pub trait TransferFunction: Send + Sync {
    /// Convert from non-linear (encoded) to linear light.
    fn to_linear(&self, encoded: f64) -> f64;

    /// Convert from linear light to non-linear (encoded).
    fn to_encoded(&self, linear: f64) -> f64;
}

// ---------------------------------------------------------------------------
// Pure power 2.2
// ---------------------------------------------------------------------------

/// Simple display gamma of 2.2 without the sRGB linear toe.
///
/// ```text
/// to_linear:  V ^ 2.2
/// to_encoded: L ^ (1 / 2.2)
/// ```
///
/// Negative inputs produce NaN, so callers clamp before encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gamma22;

impl Gamma22 {
    pub const GAMMA: f64 = 2.2;
}

impl TransferFunction for Gamma22 {
    fn to_linear(&self, encoded: f64) -> f64 {
        encoded.powf(Self::GAMMA)
    }

    fn to_encoded(&self, linear: f64) -> f64 {
        linear.powf(1.0 / Self::GAMMA)
    }
}
