//! Color-vision deficiency models and the two per-sample transforms.

pub mod daltonize;
pub mod model;
pub mod simulate;

pub use daltonize::{Daltonizer, daltonize};
pub use model::{ConfusionLine, CvdMatrix, DeficiencyKind};
pub use simulate::{Simulator, simulate};
