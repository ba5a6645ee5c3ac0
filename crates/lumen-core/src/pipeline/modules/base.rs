use anyhow::Result;

use crate::color::{self, ColorMatrix};
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Base adjustment stage: the seven classic filter primitives in their
/// fixed order
///
/// ```text
/// brightness -> contrast -> saturate -> blur -> sepia -> hue-rotate -> grayscale
/// ```
///
/// The six color primitives are affine maps and collapse into one matrix
/// applied in a single pass. Blur sits mid-chain, but a normalized Gaussian
/// commutes with affine per-pixel maps (weights sum to 1, so offsets pass
/// through), which lets us run it separately without changing the result.
pub struct BaseAdjust;

impl ProcessingModule for BaseAdjust {
    fn name(&self) -> &str {
        "base_adjust"
    }

    fn process(&self, input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        let matrix = base_matrix(settings);
        let blurred = settings.blur > 0.0;

        if matrix.is_identity() && !blurred {
            return Ok(input);
        }

        let mut current = input;

        if !matrix.is_identity() {
            for pixel in current.data.chunks_exact_mut(3) {
                let out = matrix.apply(pixel[0], pixel[1], pixel[2]);
                pixel.copy_from_slice(&out);
            }
        }

        if blurred {
            let img = current.to_rgb_image()?;
            current = ImageBuf::from_rgb_image(image::imageops::blur(&img, settings.blur));
        }

        Ok(current)
    }
}

/// Compose the six color primitives at the settings' strengths.
fn base_matrix(settings: &FilterSettings) -> ColorMatrix {
    color::brightness(settings.brightness / 100.0)
        .then(&color::contrast(settings.contrast / 100.0))
        .then(&color::saturate(settings.saturation / 100.0))
        .then(&color::sepia(settings.sepia / 100.0))
        .then(&color::hue_rotate(settings.hue))
        .then(&color::grayscale(settings.grayscale / 100.0))
}
