use tracing::debug;

use lumen_core::image_buf::{FilterSettings, ImageBuf};
use lumen_export::EncodedImage;

use crate::processor::Processor;
use crate::scheduler::JobHandle;

/// The image entity owned by the surrounding application: identity,
/// current settings, and an edit flag. The pipeline never mutates this
/// directly; results come back through `EditSession::commit`.
#[derive(Clone, Debug)]
pub struct ImageRecord {
    pub id: u64,
    pub name: String,
    pub byte_size: u64,
    pub filters: FilterSettings,
    pub is_edited: bool,
}

impl ImageRecord {
    pub fn new(id: u64, name: impl Into<String>, byte_size: u64) -> Self {
        Self {
            id,
            name: name.into(),
            byte_size,
            filters: FilterSettings::default(),
            is_edited: false,
        }
    }
}

/// Editing state for one image, including the stale-result guard.
///
/// Pipeline runs are scheduled asynchronously, so a slow run for old
/// settings can finish after a fast run for newer ones. Each request bumps
/// a monotonic generation; `commit` applies a result only if its generation
/// is still the latest and discards it otherwise (last request wins, not
/// last finisher).
pub struct EditSession {
    record: ImageRecord,
    source: ImageBuf,
    latest_generation: u64,
    preview: Option<EncodedImage>,
}

impl EditSession {
    pub fn new(record: ImageRecord, source: ImageBuf) -> Self {
        Self {
            record,
            source,
            latest_generation: 0,
            preview: None,
        }
    }

    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    pub fn source(&self) -> &ImageBuf {
        &self.source
    }

    pub fn preview(&self) -> Option<&EncodedImage> {
        self.preview.as_ref()
    }

    /// Schedule a filter run for new settings. Returns the run's generation
    /// together with its handle; pass both back to `commit`.
    pub fn request_filters(
        &mut self,
        processor: &Processor,
        settings: FilterSettings,
    ) -> (u64, JobHandle) {
        self.latest_generation += 1;
        let generation = self.latest_generation;
        self.record.filters = settings.clone();
        debug!(image = self.record.id, generation, "requesting filter run");
        (generation, processor.apply_filters(&self.source, &settings))
    }

    /// Apply a finished run's result. Returns false (and changes nothing)
    /// if a newer request has been made since this run was scheduled.
    pub fn commit(&mut self, generation: u64, encoded: EncodedImage) -> bool {
        if generation != self.latest_generation {
            debug!(
                image = self.record.id,
                generation,
                latest = self.latest_generation,
                "discarding stale pipeline result"
            );
            return false;
        }
        self.preview = Some(encoded);
        self.record.is_edited = !self.record.filters.is_neutral();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::InlineScheduler;
    use std::sync::Arc;

    fn session() -> EditSession {
        EditSession::new(
            ImageRecord::new(1, "test.jpg", 1024),
            ImageBuf::filled(8, 8, [100, 100, 100]),
        )
    }

    #[tokio::test]
    async fn commit_applies_latest_generation() {
        let processor = Processor::new(Arc::new(InlineScheduler));
        let mut session = session();

        let settings = FilterSettings {
            brightness: 120.0,
            ..Default::default()
        };
        let (generation, handle) = session.request_filters(&processor, settings);
        let encoded = handle.wait().await.unwrap();

        assert!(session.commit(generation, encoded));
        assert!(session.preview().is_some());
        assert!(session.record().is_edited);
    }

    #[tokio::test]
    async fn stale_result_is_discarded() {
        let processor = Processor::new(Arc::new(InlineScheduler));
        let mut session = session();

        let (old_generation, old_handle) = session.request_filters(
            &processor,
            FilterSettings {
                brightness: 150.0,
                ..Default::default()
            },
        );
        let (new_generation, new_handle) = session.request_filters(
            &processor,
            FilterSettings {
                brightness: 80.0,
                ..Default::default()
            },
        );

        // The older run finishes last; it must not clobber the newer one.
        let new_encoded = new_handle.wait().await.unwrap();
        assert!(session.commit(new_generation, new_encoded));
        let old_encoded = old_handle.wait().await.unwrap();
        assert!(!session.commit(old_generation, old_encoded));

        // The entity still reflects the newest request.
        assert_eq!(session.record().filters.brightness, 80.0);
    }

    #[tokio::test]
    async fn neutral_commit_clears_edit_flag() {
        let processor = Processor::new(Arc::new(InlineScheduler));
        let mut session = session();

        let (generation, handle) =
            session.request_filters(&processor, FilterSettings::default());
        let encoded = handle.wait().await.unwrap();
        assert!(session.commit(generation, encoded));
        assert!(!session.record().is_edited);
    }

    #[test]
    fn new_record_is_unedited() {
        let record = ImageRecord::new(7, "fresh.png", 2048);
        assert!(!record.is_edited);
        assert!(record.filters.is_neutral());
        assert_eq!(record.name, "fresh.png");
    }
}
