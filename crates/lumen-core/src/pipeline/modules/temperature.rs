use anyhow::Result;

use crate::color::clamp_u8;
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Color temperature and tint stage.
///
/// Temperature shifts red and blue in opposite directions (warm = more red,
/// less blue); tint shifts green (positive = green, negative = magenta).
/// These are flat channel offsets, not a chromatic adaptation.
pub struct Temperature;

const TEMP_SHIFT: f32 = 30.0;
const TINT_SHIFT: f32 = 20.0;

impl ProcessingModule for Temperature {
    fn name(&self) -> &str {
        "temperature"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if settings.temperature == 0.0 && settings.tint == 0.0 {
            return Ok(input);
        }

        let temp = settings.temperature / 100.0 * TEMP_SHIFT;
        let tint = settings.tint / 100.0 * TINT_SHIFT;

        for pixel in input.data.chunks_exact_mut(3) {
            pixel[0] = clamp_u8(pixel[0] as f32 + temp);
            pixel[1] = clamp_u8(pixel[1] as f32 + tint);
            pixel[2] = clamp_u8(pixel[2] as f32 - temp);
        }
        Ok(input)
    }
}
