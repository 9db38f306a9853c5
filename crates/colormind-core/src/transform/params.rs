//! Parameter structs that define a CVD transform.
//!
//! `TransformConfig` is the single source of truth for one transform call.
//! `FilterRequest` adds the simulate/daltonize mode and is what a UI or a
//! JSON config file hands to the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cvd::model::{ConfusionLine, DeficiencyKind};
use crate::error::{CvdError, Result};

/// Which transform a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Render how colors appear to a CVD viewer.
    Simulate,
    /// Shift colors so a CVD viewer can tell them apart.
    #[default]
    Daltonize,
}

impl TransformMode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Simulate => "simulate",
            Self::Daltonize => "daltonize",
        }
    }
}

impl FromStr for TransformMode {
    type Err = CvdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simulate" => Ok(Self::Simulate),
            "daltonize" => Ok(Self::Daltonize),
            _ => Err(CvdError::UnknownMode(s.to_string())),
        }
    }
}

/// Filter selected by the caller.
///
/// Deserializes through [`FromStr`]: names match case-insensitively and
/// `"None"` is accepted for `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum FilterKind {
    /// No change.
    #[default]
    Normal,
    Protanope,
    Deuteranope,
    Tritanope,
    /// Luminance-only blend; simulate mode only.
    Achromatope,
    /// Caller-supplied confusion line; simulate mode only.
    Custom,
}

impl FilterKind {
    /// Human-readable label for UI menus and log lines.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Protanope => "Protanope",
            Self::Deuteranope => "Deuteranope",
            Self::Tritanope => "Tritanope",
            Self::Achromatope => "Achromatope",
            Self::Custom => "Custom",
        }
    }

    /// The table-backed deficiency this filter maps to, if any.
    pub const fn deficiency(&self) -> Option<DeficiencyKind> {
        match self {
            Self::Protanope => Some(DeficiencyKind::Protanope),
            Self::Deuteranope => Some(DeficiencyKind::Deuteranope),
            Self::Tritanope => Some(DeficiencyKind::Tritanope),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [FilterKind; 6] = [
            FilterKind::Normal,
            FilterKind::Protanope,
            FilterKind::Deuteranope,
            FilterKind::Tritanope,
            FilterKind::Achromatope,
            FilterKind::Custom,
        ];
        &ALL
    }
}

impl From<DeficiencyKind> for FilterKind {
    fn from(kind: DeficiencyKind) -> Self {
        match kind {
            DeficiencyKind::Protanope => Self::Protanope,
            DeficiencyKind::Deuteranope => Self::Deuteranope,
            DeficiencyKind::Tritanope => Self::Tritanope,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for FilterKind {
    type Error = CvdError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for FilterKind {
    type Err = CvdError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::Normal);
        }
        Self::all()
            .iter()
            .copied()
            .find(|k| k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CvdError::UnknownDeficiencyKind(s.to_string()))
    }
}

/// Configuration for a single simulate or daltonize transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    /// Filter to apply. Default: `Normal`.
    #[serde(default)]
    pub kind: FilterKind,
    /// Blend between the original (0.0) and the full effect (1.0).
    /// Ignored by daltonize. Default: 1.0.
    #[serde(default = "TransformConfig::default_amount")]
    pub amount: f64,
    /// Confusion line used when `kind` is `Custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_line: Option<ConfusionLine>,
}

impl TransformConfig {
    pub fn new(kind: FilterKind, amount: f64) -> Self {
        Self {
            kind,
            amount,
            custom_line: None,
        }
    }

    /// Simulate along a caller-supplied confusion line.
    pub fn custom(line: ConfusionLine, amount: f64) -> Self {
        Self {
            kind: FilterKind::Custom,
            amount,
            custom_line: Some(line),
        }
    }

    fn default_amount() -> f64 {
        1.0
    }

    /// Check the amount range and that `kind` is usable in `mode`.
    pub fn validate(&self, mode: TransformMode) -> Result<()> {
        if !(0.0..=1.0).contains(&self.amount) {
            return Err(CvdError::InvalidAmount(self.amount));
        }
        match (mode, self.kind) {
            (TransformMode::Daltonize, FilterKind::Achromatope | FilterKind::Custom) => Err(
                CvdError::UnknownDeficiencyKind(format!("{} cannot be daltonized", self.kind)),
            ),
            (TransformMode::Simulate, FilterKind::Custom) => match self.custom_line {
                Some(line) if line.is_finite() => Ok(()),
                Some(_) => Err(CvdError::InvalidConfusionLine),
                None => Err(CvdError::UnknownDeficiencyKind(
                    "Custom without a confusion line".to_string(),
                )),
            },
            _ => Ok(()),
        }
    }
}

impl Default for TransformConfig {
    /// Produces an identity (no-op) transform.
    fn default() -> Self {
        Self::new(FilterKind::Normal, Self::default_amount())
    }
}

/// A transform configuration together with the mode to run it in.
///
/// Deserializes from the flat JSON shape
/// `{"mode", "kind", "amount", "customLine": {"x", "y", "m", "yint"}}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub mode: TransformMode,
    #[serde(flatten)]
    pub config: TransformConfig,
}

impl FilterRequest {
    pub fn new(mode: TransformMode, config: TransformConfig) -> Self {
        Self { mode, config }
    }

    /// Parse and validate a JSON request.
    pub fn from_json(json: &str) -> Result<Self> {
        let request = Self::parse_json(json)?;
        request.validate()?;
        Ok(request)
    }

    /// Parse a JSON request without validating it, so callers can apply
    /// overrides first.
    ///
    /// An unrecognized `kind` name fails with
    /// [`CvdError::UnknownDeficiencyKind`]; other malformed input fails with
    /// [`CvdError::Config`].
    pub fn parse_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(kind) = value.get("kind").and_then(serde_json::Value::as_str) {
            kind.parse::<FilterKind>()?;
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate(self.mode)
    }
}
