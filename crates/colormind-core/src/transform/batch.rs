//! Batch application of one transform across a buffer of samples.
//!
//! Every sample is independent, so buffers are processed as a parallel
//! map-by-index: output `i` always corresponds to input `i`. Achromatic
//! samples skip dispatch unless the transform is the achromatope blend. A sample whose transform hits a numeric
//! fault keeps its input value and the batch carries on.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{CvdError, Result};
use crate::sample::Rgba;
use crate::transform::evaluate::{PreparedTransform, SampleTransform};
use crate::transform::params::{TransformConfig, TransformMode};

/// Counts of how each sample in a batch was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchStats {
    /// Total samples visited.
    pub samples: usize,
    /// Achromatic samples passed through without dispatch.
    pub passthrough: usize,
    /// Samples replaced with their own input after a numeric fault.
    pub fallbacks: usize,
}

impl BatchStats {
    fn merge(self, other: Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            passthrough: self.passthrough + other.passthrough,
            fallbacks: self.fallbacks + other.fallbacks,
        }
    }
}

/// Transform a buffer into a new buffer of the same length and order.
///
/// Configuration errors are returned before any sample is processed.
pub fn apply_to_buffer(
    buffer: &[Rgba],
    config: &TransformConfig,
    mode: TransformMode,
) -> Result<Vec<Rgba>> {
    let mut out = buffer.to_vec();
    apply_in_place(&mut out, config, mode)?;
    Ok(out)
}

/// Transform a buffer in place.
pub fn apply_in_place(
    buffer: &mut [Rgba],
    config: &TransformConfig,
    mode: TransformMode,
) -> Result<BatchStats> {
    let transform = PreparedTransform::new(config, mode)?;
    tracing::debug!(
        "{} {} over {} samples (amount {})",
        mode.label(),
        config.kind,
        buffer.len(),
        config.amount
    );
    let stats = run(buffer, &transform);
    report(&stats);
    Ok(stats)
}

/// Transform flat `r, g, b, a` bytes in place, as laid out by canvas
/// `ImageData` or an 8-bit RGBA image.
///
/// Fails with [`CvdError::BufferLength`] if the length is not a multiple of 4.
pub fn apply_to_bytes(
    data: &mut [u8],
    config: &TransformConfig,
    mode: TransformMode,
) -> Result<BatchStats> {
    if data.len() % 4 != 0 {
        return Err(CvdError::BufferLength(data.len()));
    }
    let samples: &mut [Rgba] = bytemuck::cast_slice_mut(data);
    apply_in_place(samples, config, mode)
}

/// Transform a decoded 8-bit RGBA image in place.
pub fn apply_to_image(
    image: &mut image::RgbaImage,
    config: &TransformConfig,
    mode: TransformMode,
) -> Result<BatchStats> {
    let (width, height) = image.dimensions();
    tracing::debug!("transforming {width}x{height} image");
    let data: &mut [u8] = image;
    apply_to_bytes(data, config, mode)
}

/// Run an already-prepared transform over `samples` in place.
pub fn run<T: SampleTransform + ?Sized>(samples: &mut [Rgba], transform: &T) -> BatchStats {
    let bypass = transform.bypasses_achromatic();
    samples
        .par_iter_mut()
        .map(|sample| {
            let mut stats = BatchStats {
                samples: 1,
                ..BatchStats::default()
            };
            if bypass && sample.is_achromatic() {
                stats.passthrough = 1;
                return stats;
            }
            match transform.transform(*sample) {
                Ok(out) => *sample = out,
                Err(e) => {
                    tracing::trace!("sample {sample} kept as input: {e}");
                    stats.fallbacks = 1;
                }
            }
            stats
        })
        .reduce(BatchStats::default, BatchStats::merge)
}

fn report(stats: &BatchStats) {
    if stats.fallbacks > 0 {
        tracing::warn!(
            "{} of {} samples could not be transformed and were left unchanged",
            stats.fallbacks,
            stats.samples
        );
    }
    tracing::debug!(
        "batch done: {} samples, {} achromatic passthrough",
        stats.samples,
        stats.passthrough
    );
}
