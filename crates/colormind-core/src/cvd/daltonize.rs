//! Daltonization: push information a CVD viewer cannot see into channels
//! they can.
//!
//! The chain is linear, so it runs directly on 0–255 channels.
//!
//! # Algorithm
//! 1. RGB → LMS
//! 2. Apply the deficiency matrix (what the viewer's cones report)
//! 3. LMS → RGB (what the viewer perceives)
//! 4. Error = original − perceived
//! 5. Shift the error into green and blue: `G' = 0.7·eR + eG`,
//!    `B' = 0.7·eR + eB`, `R' = 0`
//! 6. Add the shift to the original, clamp to [0, 255], truncate

use crate::color_management::color_space::{ColorMatrix, lms_to_rgb_error, rgb_to_lms};
use crate::cvd::model::{CvdMatrix, DeficiencyKind, matrix_for};
use crate::error::Result;
use crate::sample::Rgba;
use crate::transform::params::{FilterKind, TransformConfig, TransformMode};

/// Redistributes the per-channel error into visible channels.
const ERROR_SHIFT: ColorMatrix = ColorMatrix::from_rows([
    [0.0, 0.0, 0.0],
    [0.7, 1.0, 0.0],
    [0.7, 0.0, 1.0],
]);

/// A validated daltonize transform, ready to run over many samples.
#[derive(Debug, Clone, Copy)]
pub struct Daltonizer {
    matrix: Option<&'static CvdMatrix>,
}

impl Daltonizer {
    /// Validate `config` for daltonize mode and resolve its matrix.
    ///
    /// `Normal` yields an identity transform. `amount` is accepted but not
    /// applied: daltonization always runs at full strength.
    pub fn new(config: &TransformConfig) -> Result<Self> {
        config.validate(TransformMode::Daltonize)?;
        let matrix = match config.kind {
            FilterKind::Normal => None,
            kind => Some(matrix_for(kind)?),
        };
        Ok(Self { matrix })
    }

    pub fn for_deficiency(kind: DeficiencyKind) -> Self {
        Self {
            matrix: Some(kind.matrix()),
        }
    }

    /// Daltonize one sample. Alpha passes through untouched.
    pub fn apply(&self, sample: Rgba) -> Rgba {
        let Some(matrix) = self.matrix else {
            return sample;
        };
        if sample.is_achromatic() {
            return sample;
        }

        let rgb = sample.rgb_f64();
        let perceived = lms_to_rgb_error(matrix.apply(rgb_to_lms(rgb)));
        let error = [rgb[0] - perceived[0], rgb[1] - perceived[1], rgb[2] - perceived[2]];
        let shift = ERROR_SHIFT.apply(error);

        Rgba::from_rgb_f64(
            [rgb[0] + shift[0], rgb[1] + shift[1], rgb[2] + shift[2]],
            sample.a,
        )
    }
}

/// Daltonize a single sample.
///
/// Fails only when `config` is not valid for daltonize mode.
pub fn daltonize(sample: Rgba, config: &TransformConfig) -> Result<Rgba> {
    Ok(Daltonizer::new(config)?.apply(sample))
}
