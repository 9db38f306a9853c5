//! ColorMind Core — color-vision deficiency simulation and daltonization.
//!
//! This crate contains the color science (RGB/LMS/XYZ conversions, CVD
//! tables), the per-sample simulate and daltonize transforms, and the
//! batch processor that applies them over pixel buffers and CSS color
//! lists. Stateless: every table is a constant, every transform is pure.

pub mod color_management;
pub mod css;
pub mod cvd;
pub mod error;
pub mod sample;
pub mod transform;

// Re-exports for convenience.
pub use cvd::{ConfusionLine, Daltonizer, DeficiencyKind, Simulator, daltonize, simulate};
pub use error::{CvdError, Result};
pub use sample::Rgba;
pub use transform::batch::{
    BatchStats, apply_in_place, apply_to_buffer, apply_to_bytes, apply_to_image,
};
pub use transform::evaluate::{PreparedTransform, SampleTransform, evaluate_transform};
pub use transform::params::{FilterKind, FilterRequest, TransformConfig, TransformMode};
