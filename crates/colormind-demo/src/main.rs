//! ColorMind Demo — apply a CVD simulation or daltonization to an image file.
//!
//! ```text
//! colormind-demo photo.png out.png --mode simulate --kind Deuteranope --amount 1
//! ```
//!
//! A JSON filter config may be given with `--config` or `COLORMIND_CONFIG`.
//! Log verbosity follows `RUST_LOG`. See `--help` for all options.

mod config;
mod image_loader;

use std::process::ExitCode;

use colormind_core::apply_to_image;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, DemoConfig};
use crate::image_loader::ImageLoadError;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error(transparent)]
    Transform(#[from] colormind_core::CvdError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = DemoConfig::from_env()?;
    let request = config.request;

    let mut image = image_loader::load_image(&config.input)?;
    tracing::info!(
        "Image loaded: {} ({}x{})",
        config.input.display(),
        image.width(),
        image.height()
    );

    let stats = apply_to_image(&mut image, &request.config, request.mode)?;
    tracing::info!(
        "{} {} applied to {} pixels ({} achromatic, {} unchanged after faults)",
        request.mode.label(),
        request.config.kind,
        stats.samples,
        stats.passthrough,
        stats.fallbacks
    );

    image_loader::save_image(&image, &config.output)?;
    tracing::info!("Saved {}", config.output.display());
    Ok(())
}
