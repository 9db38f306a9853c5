//! Transform pipeline — parameter definitions, per-sample dispatch, and
//! batch application over buffers.

pub mod batch;
pub mod evaluate;
pub mod params;
