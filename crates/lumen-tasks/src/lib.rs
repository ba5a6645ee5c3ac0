pub mod processor;
pub mod scheduler;
pub mod session;

pub use processor::Processor;
pub use scheduler::{BackgroundScheduler, InlineScheduler, Job, JobHandle, Scheduler};
pub use session::{EditSession, ImageRecord};
