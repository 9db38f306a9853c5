//! Constant parameter tables per color-vision deficiency.
//!
//! Two tables, both indexed only by [`DeficiencyKind`]:
//! - the LMS-space matrix the daltonizer uses to model what a CVD viewer's
//!   cones report;
//! - the confusion line in CIE xy the simulator projects colors onto.
//!
//! # Reference
//! - Brettel, Viénot & Mollon (1997) — dichromat simulation
//! - Meyer & Greenberg (1988) — confusion points

use serde::{Deserialize, Serialize};

use crate::color_management::color_space::ColorMatrix;
use crate::error::{CvdError, Result};
use crate::transform::params::FilterKind;

/// A 3x3 row-major LMS matrix modelling one dichromacy.
pub type CvdMatrix = ColorMatrix;

/// The three dichromacies backed by table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeficiencyKind {
    /// Missing L cones; reds are greatly reduced.
    Protanope,
    /// Missing M cones; greens are greatly reduced.
    Deuteranope,
    /// Missing S cones; blues are greatly reduced.
    Tritanope,
}

impl DeficiencyKind {
    pub const ALL: [DeficiencyKind; 3] = [Self::Protanope, Self::Deuteranope, Self::Tritanope];

    pub const fn matrix(self) -> &'static CvdMatrix {
        match self {
            Self::Protanope => &PROTANOPE_MATRIX,
            Self::Deuteranope => &DEUTERANOPE_MATRIX,
            Self::Tritanope => &TRITANOPE_MATRIX,
        }
    }

    pub const fn confusion_line(self) -> ConfusionLine {
        match self {
            Self::Protanope => PROTANOPE_LINE,
            Self::Deuteranope => DEUTERANOPE_LINE,
            Self::Tritanope => TRITANOPE_LINE,
        }
    }
}

/// A line in CIE xy chromaticity along which one deficiency cannot tell
/// colors apart.
///
/// `anchor_x`/`anchor_y` is the copunctal (confusion) point every source
/// color is projected from; `slope`/`y_intercept` describe the line the
/// projection lands on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfusionLine {
    #[serde(rename = "x")]
    pub anchor_x: f64,
    #[serde(rename = "y")]
    pub anchor_y: f64,
    #[serde(rename = "m")]
    pub slope: f64,
    #[serde(rename = "yint")]
    pub y_intercept: f64,
}

impl ConfusionLine {
    pub const fn new(anchor_x: f64, anchor_y: f64, slope: f64, y_intercept: f64) -> Self {
        Self {
            anchor_x,
            anchor_y,
            slope,
            y_intercept,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.anchor_x.is_finite()
            && self.anchor_y.is_finite()
            && self.slope.is_finite()
            && self.y_intercept.is_finite()
    }
}

const PROTANOPE_MATRIX: CvdMatrix = ColorMatrix::from_rows([
    [0.0, 2.02344, -2.52581],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
]);

const DEUTERANOPE_MATRIX: CvdMatrix = ColorMatrix::from_rows([
    [1.0, 0.0, 0.0],
    [0.494207, 0.0, 1.24827],
    [0.0, 0.0, 1.0],
]);

const TRITANOPE_MATRIX: CvdMatrix = ColorMatrix::from_rows([
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-0.395913, 0.801109, 0.0],
]);

const PROTANOPE_LINE: ConfusionLine = ConfusionLine::new(0.7465, 0.2535, 1.273463, -0.073894);
const DEUTERANOPE_LINE: ConfusionLine = ConfusionLine::new(1.4, -0.4, 0.968437, 0.003331);
const TRITANOPE_LINE: ConfusionLine = ConfusionLine::new(0.1748, 0.0, 0.062921, 0.292119);

/// Daltonize matrix for a filter kind.
///
/// Fails with [`CvdError::UnknownDeficiencyKind`] for anything other than
/// the three table-backed deficiencies.
pub fn matrix_for(kind: FilterKind) -> Result<&'static CvdMatrix> {
    kind.deficiency()
        .map(DeficiencyKind::matrix)
        .ok_or_else(|| CvdError::UnknownDeficiencyKind(kind.to_string()))
}

/// Confusion line for a filter kind. `Custom` uses `custom_line`.
pub fn confusion_line_for(
    kind: FilterKind,
    custom_line: Option<ConfusionLine>,
) -> Result<ConfusionLine> {
    match (kind.deficiency(), kind, custom_line) {
        (Some(deficiency), _, _) => Ok(deficiency.confusion_line()),
        (None, FilterKind::Custom, Some(line)) => Ok(line),
        _ => Err(CvdError::UnknownDeficiencyKind(kind.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_lookup_for_each_deficiency() {
        for kind in DeficiencyKind::ALL {
            let m = matrix_for(kind.into()).unwrap();
            assert_eq!(m, kind.matrix());
        }
        assert_eq!(matrix_for(FilterKind::Protanope).unwrap().row(0), [0.0, 2.02344, -2.52581]);
    }

    #[test]
    fn test_matrix_lookup_rejects_non_deficiency() {
        for kind in [FilterKind::Normal, FilterKind::Achromatope, FilterKind::Custom] {
            assert!(matches!(matrix_for(kind), Err(CvdError::UnknownDeficiencyKind(_))));
        }
    }

    #[test]
    fn test_confusion_line_lookup() {
        let line = confusion_line_for(FilterKind::Tritanope, None).unwrap();
        assert_eq!(line, ConfusionLine::new(0.1748, 0.0, 0.062921, 0.292119));
    }

    #[test]
    fn test_custom_line_used_only_for_custom() {
        let custom = ConfusionLine::new(0.5, 0.5, 1.0, 0.0);
        assert_eq!(confusion_line_for(FilterKind::Custom, Some(custom)).unwrap(), custom);
        assert_eq!(
            confusion_line_for(FilterKind::Deuteranope, Some(custom)).unwrap(),
            DeficiencyKind::Deuteranope.confusion_line()
        );
        assert!(confusion_line_for(FilterKind::Custom, None).is_err());
        assert!(confusion_line_for(FilterKind::Achromatope, Some(custom)).is_err());
    }

    #[test]
    fn test_confusion_line_serde_uses_short_names() {
        let json = serde_json::to_string(&DeficiencyKind::Protanope.confusion_line()).unwrap();
        assert_eq!(json, r#"{"x":0.7465,"y":0.2535,"m":1.273463,"yint":-0.073894}"#);
    }
}
