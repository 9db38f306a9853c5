//! Simulation: render how a color appears to a viewer with a CVD.
//!
//! Dichromacies (and custom lines) project the color's chromaticity along a
//! line through the deficiency's confusion point onto its confusion line,
//! keep the original luminance, then pull the result back into the sRGB
//! gamut by moving it toward neutral gray of the same luminance.
//! Achromatopsia is a luminance-only blend.
//!
//! The chromatic chain normalizes channels to `[0, 1]` on entry and only
//! returns to 0–255 for the final blend and truncation.
//!
//! # Reference
//! - Meyer & Greenberg (1988) — confusion-line simulation
//! - Wickline, Color.Vision.Simulate (2000)

use crate::color_management::color_space::{
    XYZ_TO_SRGB, rgb_to_xyz, xyz_to_chromaticity, xyz_to_linear_rgb,
};
use crate::color_management::transfer::{Gamma22, TransferFunction};
use crate::cvd::model::{ConfusionLine, confusion_line_for};
use crate::error::{CvdError, Result};
use crate::sample::Rgba;
use crate::transform::params::{FilterKind, TransformConfig, TransformMode};

/// Luminance weights applied to raw (non-linearized) channels for
/// achromatopsia.
const ACHROMATOPE_WEIGHTS: [f64; 3] = [0.212656, 0.715158, 0.072186];

/// D65 white chromaticity used to build neutral gray at a given luminance.
const NEUTRAL_X: f64 = 0.312713;
const NEUTRAL_Y: f64 = 0.329016;
const NEUTRAL_Z: f64 = 0.358271;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Projection {
    Identity,
    Achromatope,
    Line(ConfusionLine),
}

/// A validated simulate transform, ready to run over many samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    projection: Projection,
    amount: f64,
}

impl Simulator {
    /// Validate `config` for simulate mode and resolve its confusion line.
    pub fn new(config: &TransformConfig) -> Result<Self> {
        config.validate(TransformMode::Simulate)?;
        let projection = match config.kind {
            FilterKind::Normal => Projection::Identity,
            FilterKind::Achromatope => Projection::Achromatope,
            kind => Projection::Line(confusion_line_for(kind, config.custom_line)?),
        };
        Ok(Self {
            projection,
            amount: config.amount,
        })
    }

    /// Whether achromatic samples pass through unchanged. The achromatope
    /// blend runs on grays too, so its truncation can darken them by one.
    pub const fn bypasses_achromatic(&self) -> bool {
        !matches!(self.projection, Projection::Achromatope)
    }

    /// Simulate one sample. Alpha passes through untouched.
    ///
    /// Fails with [`CvdError::DivisionByZero`] when the projection is
    /// degenerate for this color.
    pub fn apply(&self, sample: Rgba) -> Result<Rgba> {
        if self.amount == 0.0 || (sample.is_achromatic() && self.bypasses_achromatic()) {
            return Ok(sample);
        }
        match self.projection {
            Projection::Identity => Ok(sample),
            Projection::Achromatope => Ok(achromatope(sample, self.amount)),
            Projection::Line(line) => {
                let normalized = sample.rgb_f64().map(|v| v / 255.0);
                let simulated = project_onto_line(normalized, &line)?.map(|v| v * 255.0);
                Ok(Rgba::from_rgb_f64(
                    blend(sample.rgb_f64(), simulated, self.amount),
                    sample.a,
                ))
            }
        }
    }
}

/// Simulate a single sample.
///
/// Fails when `config` is invalid for simulate mode or the projection is
/// degenerate for this color.
pub fn simulate(sample: Rgba, config: &TransformConfig) -> Result<Rgba> {
    Simulator::new(config)?.apply(sample)
}

fn achromatope(sample: Rgba, amount: f64) -> Rgba {
    let rgb = sample.rgb_f64();
    let mono = rgb[0] * ACHROMATOPE_WEIGHTS[0]
        + rgb[1] * ACHROMATOPE_WEIGHTS[1]
        + rgb[2] * ACHROMATOPE_WEIGHTS[2];
    Rgba::from_rgb_f64(blend(rgb, [mono; 3], amount), sample.a)
}

/// Linear interpolation `src·(1 − amount) + dst·amount` per channel.
fn blend(src: [f64; 3], dst: [f64; 3], amount: f64) -> [f64; 3] {
    [
        src[0] * (1.0 - amount) + dst[0] * amount,
        src[1] * (1.0 - amount) + dst[1] * amount,
        src[2] * (1.0 - amount) + dst[2] * amount,
    ]
}

/// Full dichromat projection of a normalized sRGB color. Returns
/// gamma-compressed channels in `[0, 1]`.
fn project_onto_line(rgb: [f64; 3], line: &ConfusionLine) -> Result<[f64; 3]> {
    let xyz = rgb_to_xyz(rgb);
    let luminance = xyz[1];
    let (dev_x, dev_y) = deviate_chromaticity(xyz_to_chromaticity(xyz)?, line)?;
    if dev_y == 0.0 {
        return Err(CvdError::DivisionByZero("projected chromaticity has y = 0"));
    }

    let sim_x = dev_x * luminance / dev_y;
    let sim_z = (1.0 - (dev_x + dev_y)) * luminance / dev_y;

    // Neutral gray at the same luminance, as an RGB-space delta from the
    // simulated color. Y is shared, so only the X and Z columns contribute.
    let neutral_x = NEUTRAL_X * luminance / NEUTRAL_Y;
    let neutral_z = NEUTRAL_Z * luminance / NEUTRAL_Y;
    let diff_x = neutral_x - sim_x;
    let diff_z = neutral_z - sim_z;
    let delta: [f64; 3] =
        std::array::from_fn(|c| diff_x * XYZ_TO_SRGB.row(c)[0] + diff_z * XYZ_TO_SRGB.row(c)[2]);

    let linear = xyz_to_linear_rgb([sim_x, luminance, sim_z]);
    let adjust = gamut_fit_factor(linear, delta);

    Ok(std::array::from_fn(|c| {
        let v = linear[c] + adjust * delta[c];
        Gamma22.to_encoded(clamp_unit(v))
    }))
}

/// Intersect the line through `source` and the confusion point with the
/// deficiency's confusion line.
fn deviate_chromaticity(source: (f64, f64), line: &ConfusionLine) -> Result<(f64, f64)> {
    let (x, y) = source;
    let run = x - line.anchor_x;
    if run == 0.0 {
        return Err(CvdError::DivisionByZero("vertical line through confusion point"));
    }
    let slope = (y - line.anchor_y) / run;
    let y_intercept = y - x * slope;

    let slope_gap = slope - line.slope;
    if slope_gap == 0.0 {
        return Err(CvdError::DivisionByZero("line parallel to confusion line"));
    }
    let dev_x = (line.y_intercept - y_intercept) / slope_gap;
    let dev_y = slope * dev_x + y_intercept;
    Ok((dev_x, dev_y))
}

/// Largest per-channel step toward neutral that brings a channel back to
/// the gamut boundary. Steps outside `[0, 1]` are ignored; 0 if none fit.
fn gamut_fit_factor(linear: [f64; 3], delta: [f64; 3]) -> f64 {
    (0..3)
        .map(|c| {
            let bound = if linear[c] < 0.0 { 0.0 } else { 1.0 };
            let fit = (bound - linear[c]) / delta[c];
            if (0.0..=1.0).contains(&fit) { fit } else { 0.0 }
        })
        .fold(0.0, f64::max)
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
