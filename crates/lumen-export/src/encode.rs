use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use lumen_core::image_buf::ImageBuf;

use crate::error::ExportError;

/// JPEG quality used for pipeline previews, regardless of the eventual
/// export format. Export-quality encoding is a separate stage.
pub const PREVIEW_JPEG_QUALITY: u8 = 90;

/// Target formats we encode. Quality is meaningful for JPEG only; PNG and
/// WebP (lossless) ignore it but it is always passed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Jpeg,
    Png,
    Webp,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Result<Self, ExportError> {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

/// Caller-facing export parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportSpec {
    pub format: ExportFormat,
    /// 10..=100; clamped at use, ignored by lossless encoders.
    pub quality: u8,
    pub filename: String,
}

/// An encoded raster ready for download or storage.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

/// Encode a buffer at the requested format and quality.
pub fn encode(buf: &ImageBuf, format: ExportFormat, quality: u8) -> Result<EncodedImage, ExportError> {
    let expected = (buf.width * buf.height * 3) as usize;
    if buf.data.len() != expected {
        return Err(ExportError::InvalidBuffer(format!(
            "{}x{} buffer holds {} bytes, expected {expected}",
            buf.width,
            buf.height,
            buf.data.len()
        )));
    }

    let quality = quality.clamp(10, 100);
    let mut bytes = Vec::new();
    let cursor = Cursor::new(&mut bytes);

    match format {
        ExportFormat::Jpeg => {
            JpegEncoder::new_with_quality(cursor, quality).write_image(
                &buf.data,
                buf.width,
                buf.height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Png => {
            PngEncoder::new(cursor).write_image(
                &buf.data,
                buf.width,
                buf.height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Webp => {
            // The image crate only ships the lossless WebP encoder; quality
            // has no effect here.
            WebPEncoder::new_lossless(cursor).write_image(
                &buf.data,
                buf.width,
                buf.height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    debug!(?format, quality, size = bytes.len(), "encoded image");

    Ok(EncodedImage {
        bytes,
        format,
        width: buf.width,
        height: buf.height,
    })
}

/// Encode at the fixed internal preview default: JPEG at quality 90.
pub fn encode_preview(buf: &ImageBuf) -> Result<EncodedImage, ExportError> {
    encode(buf, ExportFormat::Jpeg, PREVIEW_JPEG_QUALITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_buf() -> ImageBuf {
        let mut data = Vec::new();
        for i in 0..64_u32 {
            data.push((i * 4) as u8);
            data.push(128);
            data.push(255 - (i * 4) as u8);
        }
        ImageBuf::from_data(8, 8, data).unwrap()
    }

    #[test]
    fn format_from_name() {
        assert_eq!(ExportFormat::from_name("jpeg").unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_name("JPG").unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from_name("png").unwrap(), ExportFormat::Png);
        assert_eq!(ExportFormat::from_name("webp").unwrap(), ExportFormat::Webp);
    }

    #[test]
    fn unknown_format_is_an_explicit_error() {
        let err = ExportFormat::from_name("tiff").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(name) if name == "tiff"));
    }

    #[test]
    fn jpeg_bytes_decode_back() {
        let buf = test_buf();
        let encoded = encode(&buf, ExportFormat::Jpeg, 90).unwrap();
        assert_eq!(encoded.format, ExportFormat::Jpeg);
        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 8);
    }

    #[test]
    fn png_roundtrip_is_lossless() {
        let buf = test_buf();
        let encoded = encode(&buf, ExportFormat::Png, 50).unwrap();
        let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), buf.data);
    }

    #[test]
    fn webp_roundtrip_is_lossless() {
        let buf = test_buf();
        let encoded = encode(&buf, ExportFormat::Webp, 10).unwrap();
        let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), buf.data);
    }

    #[test]
    fn jpeg_quality_changes_size() {
        // Needs enough texture for quality to matter.
        let mut data = Vec::new();
        for i in 0..(64 * 64) as u32 {
            data.push((i * 7 % 256) as u8);
            data.push((i * 13 % 256) as u8);
            data.push((i * 29 % 256) as u8);
        }
        let buf = ImageBuf::from_data(64, 64, data).unwrap();
        let low = encode(&buf, ExportFormat::Jpeg, 10).unwrap();
        let high = encode(&buf, ExportFormat::Jpeg, 100).unwrap();
        assert!(
            high.bytes.len() > low.bytes.len(),
            "higher quality should cost more bytes: {} vs {}",
            high.bytes.len(),
            low.bytes.len()
        );
    }

    #[test]
    fn quality_is_clamped_not_rejected() {
        let buf = test_buf();
        assert!(encode(&buf, ExportFormat::Jpeg, 0).is_ok());
        assert!(encode(&buf, ExportFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn preview_is_jpeg_q90() {
        let encoded = encode_preview(&test_buf()).unwrap();
        assert_eq!(encoded.format, ExportFormat::Jpeg);
        assert!(!encoded.bytes.is_empty());
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let buf = ImageBuf {
            width: 4,
            height: 4,
            data: vec![0; 10],
        };
        let err = encode(&buf, ExportFormat::Png, 90).unwrap_err();
        assert!(matches!(err, ExportError::InvalidBuffer(_)));
    }

    #[test]
    fn spec_serde_roundtrip() {
        let spec = ExportSpec {
            format: ExportFormat::Webp,
            quality: 80,
            filename: "sunset".to_string(),
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"webp\""));
        let back: ExportSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.format, ExportFormat::Webp);
        assert_eq!(back.filename, "sunset");
    }
}
