use anyhow::Result;

use crate::color::clamp_u8;
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Vibrance stage: selective saturation boost.
///
/// Each channel below the pixel's maximum is pulled toward that maximum by
/// an amount weighted by how far the pixel already is from gray:
///
/// ```text
///   amount = (|max - avg| * 2 / 255) * (vibrance / 100)
///   channel += (max - channel) * amount
/// ```
///
/// Near-gray pixels barely move while the brightest channel is never
/// touched, which keeps skin tones from over-boosting.
pub struct Vibrance;

impl ProcessingModule for Vibrance {
    fn name(&self) -> &str {
        "vibrance"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if settings.vibrance == 0.0 {
            return Ok(input);
        }

        let strength = settings.vibrance / 100.0;
        for pixel in input.data.chunks_exact_mut(3) {
            let (r, g, b) = (pixel[0] as f32, pixel[1] as f32, pixel[2] as f32);
            let max = r.max(g).max(b);
            let avg = (r + g + b) / 3.0;
            let amount = (max - avg).abs() * 2.0 / 255.0 * strength;

            if r < max {
                pixel[0] = clamp_u8(r + (max - r) * amount);
            }
            if g < max {
                pixel[1] = clamp_u8(g + (max - g) * amount);
            }
            if b < max {
                pixel[2] = clamp_u8(b + (max - b) * amount);
            }
        }
        Ok(input)
    }
}
