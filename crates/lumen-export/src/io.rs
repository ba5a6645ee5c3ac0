use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use lumen_core::image_buf::ImageBuf;

use crate::encode::EncodedImage;

/// Load any supported image file into an 8-bit RGB buffer.
pub fn load(path: &Path) -> Result<ImageBuf> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image: {}", path.display()))?;
    Ok(ImageBuf::from_rgb_image(img.to_rgb8()))
}

/// Save an encoded image as `{filename}.{ext}` under `dir`.
///
/// This is the "download" side effect: write-and-done, the caller gets the
/// final path back but no other contract.
pub fn save(encoded: &EncodedImage, dir: &Path, filename: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{filename}.{}", encoded.format.extension()));
    fs::write(&path, &encoded.bytes)
        .with_context(|| format!("failed to write: {}", path.display()))?;
    info!(path = %path.display(), bytes = encoded.bytes.len(), "saved image");
    Ok(path)
}
