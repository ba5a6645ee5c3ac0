use anyhow::Result;

use crate::color::clamp_u8;
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Vintage warm-fade remap: fixed per-channel gains that push the image
/// toward faded amber (red up, green down, blue well down).
pub struct Vintage;

const RED_GAIN: f32 = 1.1;
const GREEN_GAIN: f32 = 0.9;
const BLUE_GAIN: f32 = 0.7;

impl ProcessingModule for Vintage {
    fn name(&self) -> &str {
        "vintage"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if !settings.vintage {
            return Ok(input);
        }

        for pixel in input.data.chunks_exact_mut(3) {
            pixel[0] = clamp_u8(pixel[0] as f32 * RED_GAIN);
            pixel[1] = clamp_u8(pixel[1] as f32 * GREEN_GAIN);
            pixel[2] = clamp_u8(pixel[2] as f32 * BLUE_GAIN);
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_is_noop() {
        let buf = ImageBuf::filled(2, 2, [100, 100, 100]);
        let expected = buf.data.clone();
        let result = Vintage.process(buf, &FilterSettings::default()).unwrap();
        assert_eq!(result.data, expected);
    }

    #[test]
    fn shifts_gray_toward_amber() {
        let buf = ImageBuf::filled(1, 1, [100, 100, 100]);
        let settings = FilterSettings {
            vintage: true,
            ..Default::default()
        };
        let result = Vintage.process(buf, &settings).unwrap();
        assert_eq!(result.data, vec![110, 90, 70]);
    }

    #[test]
    fn red_gain_clamps_at_white() {
        let buf = ImageBuf::filled(1, 1, [250, 250, 250]);
        let settings = FilterSettings {
            vintage: true,
            ..Default::default()
        };
        let result = Vintage.process(buf, &settings).unwrap();
        assert_eq!(result.data[0], 255);
        assert_eq!(result.data[1], 225);
        assert_eq!(result.data[2], 175);
    }
}
