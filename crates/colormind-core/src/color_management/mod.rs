//! Color management — RGB/LMS/XYZ conversions and gamma transfer.

pub mod color_space;
pub mod transfer;
