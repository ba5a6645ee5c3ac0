use anyhow::Result;

use crate::color::{clamp_u8, mean_luminance};
use crate::image_buf::{FilterSettings, ImageBuf};
use crate::pipeline::module::ProcessingModule;

/// Tonal range stage: splits pixels into shadow/midtone/highlight bands by
/// their unweighted RGB mean and rescales each band independently.
///
/// ```text
///   mean  0.. 85  shadows
///   mean 85..170  midtones  (inclusive on both ends)
///   mean 170..255 highlights
/// ```
///
/// A pixel belongs to exactly one band, decided from its pre-stage
/// luminance; the band's factor is `1 + setting/100` and is only applied
/// when the setting is non-zero.
pub struct ToneBands;

const SHADOW_MAX: f32 = 85.0;
const HIGHLIGHT_MIN: f32 = 170.0;

impl ProcessingModule for ToneBands {
    fn name(&self) -> &str {
        "tone_bands"
    }

    fn process(&self, mut input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        if settings.highlights == 0.0 && settings.shadows == 0.0 && settings.midtones == 0.0 {
            return Ok(input);
        }

        let shadow_factor = 1.0 + settings.shadows / 100.0;
        let midtone_factor = 1.0 + settings.midtones / 100.0;
        let highlight_factor = 1.0 + settings.highlights / 100.0;

        for pixel in input.data.chunks_exact_mut(3) {
            let mean = mean_luminance(pixel[0], pixel[1], pixel[2]);

            let factor = if mean < SHADOW_MAX {
                if settings.shadows == 0.0 {
                    continue;
                }
                shadow_factor
            } else if mean > HIGHLIGHT_MIN {
                if settings.highlights == 0.0 {
                    continue;
                }
                highlight_factor
            } else {
                if settings.midtones == 0.0 {
                    continue;
                }
                midtone_factor
            };

            pixel[0] = clamp_u8(pixel[0] as f32 * factor);
            pixel[1] = clamp_u8(pixel[1] as f32 * factor);
            pixel[2] = clamp_u8(pixel[2] as f32 * factor);
        }
        Ok(input)
    }
}
