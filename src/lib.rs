//! pipetrack - Status tracking for multi-step pipeline runs

pub mod cli;
pub mod core;
pub mod error;
pub mod persistence;
pub mod serial;

// Re-export commonly used types
pub use crate::core::{Clock, FixedClock, SystemClock, TickClock};
pub use crate::core::{JobState, JobStatus, PipelineState, PipelineStatus, StatusMessage};
pub use crate::core::{PublishCallback, ISO_FORMAT};
pub use crate::error::StatusError;
pub use crate::persistence::{InMemoryStore, JsonFileStore, RunSummary, StatusStore};
pub use crate::serial::Serial;
