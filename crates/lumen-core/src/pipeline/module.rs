use anyhow::Result;

use crate::image_buf::{FilterSettings, ImageBuf};

/// A single step in the filter pipeline.
///
/// Modules take ownership of the working buffer and hand back either the
/// same buffer untouched (neutral settings) or a transformed one. No module
/// keeps state between calls; every invocation owns its own buffer.
pub trait ProcessingModule: Send + Sync {
    fn name(&self) -> &str;
    fn process(&self, input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf>;
}
