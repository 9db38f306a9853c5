//! Fixed 3x3 conversions between RGB, LMS, XYZ and xyY chromaticity.
//!
//! All matrices are sRGB / D65. The RGB→LMS pair operates on whatever scale
//! the caller feeds it (the daltonize chain is linear and stays on 0–255);
//! the XYZ functions expect normalized `[0, 1]` channels.

use glam::{DMat3, DVec3};

use crate::color_management::transfer::{Gamma22, TransferFunction};
use crate::error::{CvdError, Result};

/// A 3x3 color matrix, written row-major and stored column-major for glam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(DMat3);

impl ColorMatrix {
    /// Build from rows as they appear in the literature.
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self(DMat3::from_cols(
            DVec3::new(m[0][0], m[1][0], m[2][0]),
            DVec3::new(m[0][1], m[1][1], m[2][1]),
            DVec3::new(m[0][2], m[1][2], m[2][2]),
        ))
    }

    /// Returns the identity matrix (no-op transform).
    pub const fn identity() -> Self {
        Self(DMat3::IDENTITY)
    }

    /// Apply this matrix to a triplet.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        (self.0 * DVec3::from_array(v)).to_array()
    }

    /// Row `i` as an array.
    pub fn row(&self, i: usize) -> [f64; 3] {
        self.0.row(i).to_array()
    }
}

/// Linear RGB → LMS cone response.
pub const RGB_TO_LMS: ColorMatrix = ColorMatrix::from_rows([
    [17.8824, 43.5161, 4.11935],
    [3.45565, 27.1554, 3.86714],
    [0.0299566, 0.184309, 1.46709],
]);

/// LMS → RGB, used to recover the RGB a CVD viewer perceives.
pub const LMS_TO_RGB: ColorMatrix = ColorMatrix::from_rows([
    [0.0809444479, -0.130504409, 0.116721066],
    [-0.0102485335, 0.0540193266, -0.113614708],
    [-0.000365296938, -0.00412161469, 0.693511405],
]);

/// Linear sRGB → CIE XYZ (D65).
pub const SRGB_TO_XYZ: ColorMatrix = ColorMatrix::from_rows([
    [0.412424, 0.357579, 0.180464],
    [0.212656, 0.715158, 0.0721856],
    [0.0193324, 0.119193, 0.950444],
]);

/// CIE XYZ (D65) → linear sRGB.
pub const XYZ_TO_SRGB: ColorMatrix = ColorMatrix::from_rows([
    [3.24071, -1.53726, -0.498571],
    [-0.969258, 1.87599, 0.0415557],
    [0.0556352, -0.203996, 1.05707],
]);

/// Convert RGB to LMS cone space.
pub fn rgb_to_lms(rgb: [f64; 3]) -> [f64; 3] {
    RGB_TO_LMS.apply(rgb)
}

/// Convert LMS back to RGB with the error-isolation matrix.
pub fn lms_to_rgb_error(lms: [f64; 3]) -> [f64; 3] {
    LMS_TO_RGB.apply(lms)
}

/// Gamma-expand normalized sRGB and convert to XYZ.
pub fn rgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    SRGB_TO_XYZ.apply(rgb.map(|v| Gamma22.to_linear(v)))
}

/// XYZ → xy chromaticity.
///
/// Fails with [`CvdError::DivisionByZero`] when `X + Y + Z == 0` (pure black).
pub fn xyz_to_chromaticity(xyz: [f64; 3]) -> Result<(f64, f64)> {
    let sum = xyz[0] + xyz[1] + xyz[2];
    if sum == 0.0 {
        return Err(CvdError::DivisionByZero("chromaticity of pure black"));
    }
    Ok((xyz[0] / sum, xyz[1] / sum))
}

/// XYZ → linear sRGB, without gamma compression or clamping.
pub fn xyz_to_linear_rgb(xyz: [f64; 3]) -> [f64; 3] {
    XYZ_TO_SRGB.apply(xyz)
}

/// XYZ → gamma-compressed sRGB. Negative linear values compress to 0.
pub fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {
    xyz_to_linear_rgb(xyz).map(|v| Gamma22.to_encoded(v.max(0.0)))
}
