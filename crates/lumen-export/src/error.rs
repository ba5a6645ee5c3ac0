use thiserror::Error;

/// Errors that can occur while encoding or saving an image.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested output format is not one we encode. No fallback
    /// format is substituted.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Pixel buffer does not form a valid image.
    #[error("invalid image buffer: {0}")]
    InvalidBuffer(String),

    /// The underlying encoder failed.
    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),
}
