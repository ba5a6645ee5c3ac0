use anyhow::Result;

use crate::color::{clamp_u8, mean_luminance};
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Dramatic remap: luminance-conditional contrast. Pixels brighter than
/// mid-gray get pushed up, darker pixels get crushed. The threshold uses the
/// unweighted RGB mean, same as the tonal band stage.
pub struct Dramatic;

const THRESHOLD: f32 = 128.0;
const BRIGHT_GAIN: f32 = 1.3;
const DARK_GAIN: f32 = 0.7;

impl ProcessingModule for Dramatic {
    fn name(&self) -> &str {
        "dramatic"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if !settings.dramatic {
            return Ok(input);
        }

        for pixel in input.data.chunks_exact_mut(3) {
            let mean = mean_luminance(pixel[0], pixel[1], pixel[2]);
            let gain = if mean > THRESHOLD {
                BRIGHT_GAIN
            } else {
                DARK_GAIN
            };
            pixel[0] = clamp_u8(pixel[0] as f32 * gain);
            pixel[1] = clamp_u8(pixel[1] as f32 * gain);
            pixel[2] = clamp_u8(pixel[2] as f32 * gain);
        }
        Ok(input)
    }
}
