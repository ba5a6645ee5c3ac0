use anyhow::Result;

use crate::color::clamp_u8;
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// How the clarity slider is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClarityMode {
    /// Per-channel scale `v * (1 + 0.5 * factor)`, i.e. an unsharp mask
    /// whose reference is the pixel halved. Default; stable under resize
    /// because it ignores the neighborhood.
    #[default]
    Global,
    /// True local contrast: unsharp mask against a Gaussian-blurred copy,
    /// `v + (v - blurred) * factor`.
    UnsharpMask,
}

/// Clarity stage. See [`ClarityMode`] for the two renderings; both clamp
/// every channel write.
pub struct Clarity {
    pub mode: ClarityMode,
}

const UNSHARP_SIGMA: f32 = 2.0;

impl Default for Clarity {
    fn default() -> Self {
        Self {
            mode: ClarityMode::Global,
        }
    }
}

impl ProcessingModule for Clarity {
    fn name(&self) -> &str {
        "clarity"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if settings.clarity == 0.0 {
            return Ok(input);
        }

        let factor = settings.clarity / 100.0;
        match self.mode {
            ClarityMode::Global => {
                let gain = 1.0 + 0.5 * factor;
                for v in input.data.iter_mut() {
                    *v = clamp_u8(*v as f32 * gain);
                }
            }
            ClarityMode::UnsharpMask => {
                let blurred =
                    ImageBuf::from_rgb_image(image::imageops::blur(&input.to_rgb_image()?, UNSHARP_SIGMA));
                for (v, &ref_v) in input.data.iter_mut().zip(blurred.data.iter()) {
                    let original = *v as f32;
                    *v = clamp_u8(original + (original - ref_v as f32) * factor);
                }
            }
        }
        Ok(input)
    }
}
