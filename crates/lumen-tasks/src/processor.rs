use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use lumen_core::geometry::{self, CropRegion, ResizeSpec};
use lumen_core::image_buf::{FilterSettings, ImageBuf};
use lumen_core::pipeline::Pipeline;
use lumen_export::ExportSpec;

use crate::scheduler::{JobHandle, Scheduler};

/// The caller-facing processing operations.
///
/// Every call clones the source into the job closure, so overlapping runs
/// never share a working buffer, and submits it to the scheduler. Results
/// come back as encoded images; applying them to an image entity goes
/// through `EditSession` to discard stale runs.
pub struct Processor {
    pipeline: Arc<Pipeline>,
    scheduler: Arc<dyn Scheduler>,
}

impl Processor {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new()),
            scheduler,
        }
    }

    /// Run the filter pipeline and encode a preview (JPEG q90).
    pub fn apply_filters(&self, image: &ImageBuf, settings: &FilterSettings) -> JobHandle {
        let pipeline = Arc::clone(&self.pipeline);
        let image = image.clone();
        let settings = settings.clone();
        debug!(w = image.width, h = image.height, "scheduling filter run");
        self.scheduler.submit(Box::new(move || {
            let processed = pipeline.process(image, &settings)?;
            lumen_export::encode_preview(&processed).context("encode filtered preview")
        }))
    }

    /// Extract a crop rectangle; independent of the filter pipeline.
    pub fn crop_image(&self, image: &ImageBuf, region: CropRegion) -> JobHandle {
        let image = image.clone();
        self.scheduler.submit(Box::new(move || {
            let cropped = geometry::crop(&image, &region)?;
            lumen_export::encode_preview(&cropped).context("encode cropped image")
        }))
    }

    /// Resample to the target dimensions; independent of the filter pipeline.
    pub fn resize_image(&self, image: &ImageBuf, spec: ResizeSpec) -> JobHandle {
        let image = image.clone();
        self.scheduler.submit(Box::new(move || {
            let resized = geometry::resize(&image, &spec)?;
            lumen_export::encode_preview(&resized).context("encode resized image")
        }))
    }

    /// Apply filters, then encode at the export format and quality.
    pub fn export_image(
        &self,
        image: &ImageBuf,
        settings: &FilterSettings,
        spec: &ExportSpec,
    ) -> JobHandle {
        let pipeline = Arc::clone(&self.pipeline);
        let image = image.clone();
        let settings = settings.clone();
        let spec = spec.clone();
        self.scheduler.submit(Box::new(move || {
            let processed = pipeline.process(image, &settings)?;
            lumen_export::encode(&processed, spec.format, spec.quality)
                .with_context(|| format!("export as {:?}", spec.format))
        }))
    }
}
