use image::RgbImage;
use serde::{Deserialize, Serialize};

/// 8-bit sRGB image buffer.
///
/// Pixel data is stored as interleaved RGBRGBRGB... with one byte per
/// channel, matching the display-referred data the filter stages operate on.
/// Per-stage arithmetic happens in f32 and is clamped back to [0,255] on
/// every channel write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuf {
    pub width: u32,
    pub height: u32,
    /// Flat pixel data: [R, G, B, R, G, B, ...].
    pub data: Vec<u8>,
}

impl ImageBuf {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 3) as usize],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = (width * height * 3) as usize;
        anyhow::ensure!(
            data.len() == expected,
            "expected {expected} bytes for {width}x{height} RGB, got {}",
            data.len()
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fill a buffer with a single color, handy for synthetic test images.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Hand the pixel data to the `image` crate for resampling, blur, encode.
    pub fn to_rgb_image(&self) -> anyhow::Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| anyhow::anyhow!("buffer does not match {}x{}", self.width, self.height))
    }

    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Non-destructive filter settings for an image.
///
/// Every field has a neutral default; a settings record where all fields are
/// neutral leaves the image untouched. Out-of-range values are not rejected
/// here; the pipeline clamps after arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Brightness in percent, 100 = identity. Range 0..=200.
    pub brightness: f32,
    /// Contrast in percent, 100 = identity. Range 0..=200.
    pub contrast: f32,
    /// Saturation in percent, 100 = identity. Range 0..=200.
    pub saturation: f32,
    /// Gaussian blur radius in pixels. Range 0..=10, fractional allowed.
    pub blur: f32,
    /// Blend toward sepia tone in percent. Range 0..=100.
    pub sepia: f32,
    /// Hue wheel rotation in degrees. Range -180..=180.
    pub hue: f32,
    /// Desaturation in percent. Range 0..=100.
    pub grayscale: f32,
    /// Stylistic warm-fade remap toggle.
    pub vintage: bool,
    /// Stylistic luminance-conditional contrast toggle.
    pub dramatic: bool,
    /// Per-band luminance scale, -100..=100, 0 = identity.
    pub highlights: f32,
    pub shadows: f32,
    pub midtones: f32,
    /// Red/blue channel shift, -100..=100.
    pub temperature: f32,
    /// Green channel shift, -100..=100.
    pub tint: f32,
    /// Selective saturation boost, -100..=100.
    pub vibrance: f32,
    /// Contrast boost, -100..=100. See `ClarityMode` for the two renderings.
    pub clarity: f32,
    /// Radial edge darkening strength, 0..=100.
    pub vignette: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur: 0.0,
            sepia: 0.0,
            hue: 0.0,
            grayscale: 0.0,
            vintage: false,
            dramatic: false,
            highlights: 0.0,
            shadows: 0.0,
            midtones: 0.0,
            temperature: 0.0,
            tint: 0.0,
            vibrance: 0.0,
            clarity: 0.0,
            vignette: 0.0,
        }
    }
}

impl FilterSettings {
    /// True when every knob sits at its no-op value.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
