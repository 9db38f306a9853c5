//! Per-sample dispatch between the simulator and the daltonizer.

use crate::cvd::{Daltonizer, Simulator};
use crate::error::Result;
use crate::sample::Rgba;
use crate::transform::params::{TransformConfig, TransformMode};

/// A transform that maps one RGBA sample to another.
///
/// Implementations must be pure: the same input always yields the same
/// output and alpha is never altered.
pub trait SampleTransform: Send + Sync {
    /// Transform one sample. Errors are per-sample numeric faults.
    fn transform(&self, sample: Rgba) -> Result<Rgba>;

    /// Whether `r == g == b` samples may skip [`transform`](Self::transform).
    fn bypasses_achromatic(&self) -> bool {
        true
    }
}

impl SampleTransform for Simulator {
    fn transform(&self, sample: Rgba) -> Result<Rgba> {
        self.apply(sample)
    }

    fn bypasses_achromatic(&self) -> bool {
        Simulator::bypasses_achromatic(self)
    }
}

impl SampleTransform for Daltonizer {
    fn transform(&self, sample: Rgba) -> Result<Rgba> {
        Ok(self.apply(sample))
    }
}

/// A validated transform in either mode.
#[derive(Debug, Clone, Copy)]
pub enum PreparedTransform {
    Simulate(Simulator),
    Daltonize(Daltonizer),
}

impl PreparedTransform {
    /// Validate `config` for `mode` and resolve table lookups once.
    pub fn new(config: &TransformConfig, mode: TransformMode) -> Result<Self> {
        Ok(match mode {
            TransformMode::Simulate => Self::Simulate(Simulator::new(config)?),
            TransformMode::Daltonize => Self::Daltonize(Daltonizer::new(config)?),
        })
    }

    pub const fn mode(&self) -> TransformMode {
        match self {
            Self::Simulate(_) => TransformMode::Simulate,
            Self::Daltonize(_) => TransformMode::Daltonize,
        }
    }
}

impl SampleTransform for PreparedTransform {
    fn transform(&self, sample: Rgba) -> Result<Rgba> {
        match self {
            Self::Simulate(s) => s.transform(sample),
            Self::Daltonize(d) => d.transform(sample),
        }
    }

    fn bypasses_achromatic(&self) -> bool {
        match self {
            Self::Simulate(s) => SampleTransform::bypasses_achromatic(s),
            Self::Daltonize(_) => true,
        }
    }
}

/// Apply `config` in `mode` to a single sample.
pub fn evaluate_transform(
    sample: Rgba,
    config: &TransformConfig,
    mode: TransformMode,
) -> Result<Rgba> {
    PreparedTransform::new(config, mode)?.transform(sample)
}
