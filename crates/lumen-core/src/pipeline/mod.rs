pub mod module;
pub mod modules;

use anyhow::Result;
use tracing::debug;

use crate::image_buf::{FilterSettings, ImageBuf};
use module::ProcessingModule;
use modules::{Clarity, ClarityMode};

/// Filter pipeline that chains modules together in a fixed order.
///
/// ```text
/// base -> vintage -> dramatic -> tone bands -> temperature -> vibrance -> clarity -> vignette
/// ```
///
/// Each module is deterministic and owns its working buffer; running the
/// pipeline twice with the same input and settings produces identical bytes.
/// Crop, resize and export live outside the pipeline (see `geometry` and the
/// export crate) and are sequenced by the caller.
pub struct Pipeline {
    modules: Vec<Box<dyn ProcessingModule>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_clarity_mode(ClarityMode::Global)
    }

    /// Build a pipeline with an explicit clarity rendering.
    pub fn with_clarity_mode(mode: ClarityMode) -> Self {
        Self {
            modules: vec![
                Box::new(modules::BaseAdjust),
                Box::new(modules::Vintage),
                Box::new(modules::Dramatic),
                Box::new(modules::ToneBands),
                Box::new(modules::Temperature),
                Box::new(modules::Vibrance),
                Box::new(Clarity { mode }),
                Box::new(modules::Vignette),
            ],
        }
    }

    /// Run the full pipeline on an input image with the given settings.
    pub fn process(&self, input: ImageBuf, settings: &FilterSettings) -> Result<ImageBuf> {
        let mut current = input;
        for module in &self.modules {
            debug!(module = module.name(), "processing");
            current = module.process(current, settings)?;
        }
        Ok(current)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
