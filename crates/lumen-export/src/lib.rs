pub mod encode;
pub mod error;
pub mod io;

pub use encode::{EncodedImage, ExportFormat, ExportSpec, PREVIEW_JPEG_QUALITY, encode, encode_preview};
pub use error::ExportError;
