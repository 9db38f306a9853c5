//! Image loading and saving for the demo application.

use std::path::Path;

use image::RgbaImage;

/// Load an image from disk as 8-bit RGBA.
///
/// Supports common formats via the `image` crate (PNG, JPEG, TIFF, ...).
/// Higher bit depths are reduced to 8 bits, matching canvas `ImageData`.
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    Ok(img.to_rgba8())
}

/// Save an RGBA image; the format follows the file extension.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<(), ImageLoadError> {
    image.save(path).map_err(ImageLoadError::Encode)
}

/// Errors that can occur during image loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
}
