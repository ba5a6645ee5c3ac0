use anyhow::{Result, anyhow};
use tokio::sync::oneshot;
use tracing::debug;

use lumen_export::EncodedImage;

/// One unit of pipeline work. Jobs are not preemptible: once a scheduler
/// starts one it runs to completion; there is no cancellation primitive
/// beyond never starting a queued job. Staleness is the caller's problem
/// (see `EditSession`).
pub type Job = Box<dyn FnOnce() -> Result<EncodedImage> + Send + 'static>;

/// Handle to a submitted job's eventual result.
pub struct JobHandle {
    rx: oneshot::Receiver<Result<EncodedImage>>,
}

impl JobHandle {
    pub async fn wait(self) -> Result<EncodedImage> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("worker dropped without reporting a result")),
        }
    }
}

/// Where pipeline work runs.
///
/// A failed job resolves only its own handle with the error; other
/// scheduled jobs are unaffected.
pub trait Scheduler: Send + Sync {
    fn submit(&self, job: Job) -> JobHandle;
}

/// Runs jobs on the tokio blocking pool so pixel loops never occupy an
/// async worker thread. Requires a tokio runtime context.
pub struct BackgroundScheduler;

impl Scheduler for BackgroundScheduler {
    fn submit(&self, job: Job) -> JobHandle {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            // The receiver may be gone if the caller stopped caring.
            if tx.send(job()).is_err() {
                debug!("job result discarded, handle dropped");
            }
        });
        JobHandle { rx }
    }
}

/// Runs jobs synchronously at submit time. Used in tests and in hosts that
/// have no background executor.
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn submit(&self, job: Job) -> JobHandle {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(job());
        JobHandle { rx }
    }
}
