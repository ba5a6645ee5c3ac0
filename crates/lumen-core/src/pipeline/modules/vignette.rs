use anyhow::Result;

use crate::color::clamp_u8;
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Vignette stage: radial darkening, multiplied into the pixels.
///
/// The darkening alpha ramps linearly from 0 at the image center to
/// `strength * 0.6` at the nominal radius (half the larger dimension). The
/// ramp is deliberately not clamped past that radius so darkening keeps
/// increasing out to the corners; the corner distance is at most sqrt(2)
/// times the radius, so the alpha stays below 1 for any strength.
pub struct Vignette;

const EDGE_ALPHA: f32 = 0.6;

impl ProcessingModule for Vignette {
    fn name(&self) -> &str {
        "vignette"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if settings.vignette == 0.0 {
            return Ok(input);
        }

        let strength = settings.vignette / 100.0 * EDGE_ALPHA;
        let cx = input.width as f32 / 2.0;
        let cy = input.height as f32 / 2.0;
        let radius = input.width.max(input.height) as f32 / 2.0;
        if radius == 0.0 {
            return Ok(input);
        }

        let width = input.width;
        for (i, pixel) in input.data.chunks_exact_mut(3).enumerate() {
            let x = (i as u32 % width) as f32 + 0.5;
            let y = (i as u32 / width) as f32 + 0.5;
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            let alpha = dist / radius * strength;
            let gain = 1.0 - alpha;

            pixel[0] = clamp_u8(pixel[0] as f32 * gain);
            pixel[1] = clamp_u8(pixel[1] as f32 * gain);
            pixel[2] = clamp_u8(pixel[2] as f32 * gain);
        }
        Ok(input)
    }
}
