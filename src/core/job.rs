//! Job-level status tracking

use crate::core::clock::{self, Clock};
use crate::core::message::StatusMessage;
use crate::core::state::JobState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Records the status of a single job within a pipeline
///
/// Field declaration order is the field order of the serialized
/// document; deserialization requires every field to be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    /// The name of the job
    pub name: String,

    /// Current lifecycle state
    pub state: JobState,

    /// When the job was started, or None if not started
    pub start_time: Option<String>,

    /// When the job was completed, or None if not completed
    pub complete_time: Option<String>,

    /// When the job failed, or None if not failed
    pub fail_time: Option<String>,

    /// Status updates recorded for the job, in insertion order
    pub messages: Vec<StatusMessage>,

    #[serde(skip, default = "crate::core::clock::system")]
    clock: Arc<dyn Clock>,
}

// Equality covers the externally represented fields; the clock is
// runtime wiring and does not survive reconstruction.
impl PartialEq for JobStatus {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.state == other.state
            && self.start_time == other.start_time
            && self.complete_time == other.complete_time
            && self.fail_time == other.fail_time
            && self.messages == other.messages
    }
}

impl JobStatus {
    /// Construct a job in QUEUED reading time from the system clock
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, clock::system())
    }

    /// Construct a job in QUEUED reading time from `clock`
    pub fn with_clock(name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            state: JobState::Queued,
            start_time: None,
            complete_time: None,
            fail_time: None,
            messages: Vec::new(),
            clock,
        }
    }

    /// Append a status message without changing state; returns its timestamp
    ///
    /// Callable in any state, including terminal ones.
    pub fn add_message(&mut self, message: impl Into<String>) -> String {
        let status_message = StatusMessage::now(message, self.clock.as_ref());
        let time = status_message.time.clone();
        self.messages.push(status_message);
        time
    }

    /// Mark the job as skipped
    pub fn skip(&mut self) -> String {
        self.skip_with("Job skipped")
    }

    /// Mark the job as skipped and record the given message
    pub fn skip_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.state = JobState::Skipped;
        debug!(job = %self.name, "job skipped");
        time
    }

    /// Mark the job as started
    pub fn start(&mut self) -> String {
        self.start_with("Job started")
    }

    /// Mark the job as started and record the given message
    pub fn start_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.start_time = Some(time.clone());
        self.state = JobState::Running;
        debug!(job = %self.name, "job started");
        time
    }

    /// Mark the job as complete
    pub fn complete(&mut self) -> String {
        self.complete_with("Job completed")
    }

    /// Mark the job as complete and record the given message
    pub fn complete_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.complete_time = Some(time.clone());
        self.state = JobState::Complete;
        debug!(job = %self.name, "job completed");
        time
    }

    /// Mark the job as failed
    pub fn fail(&mut self) -> String {
        self.fail_with("Job failed")
    }

    /// Mark the job as failed and record the given message
    pub fn fail_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.fail_time = Some(time.clone());
        self.state = JobState::Failed;
        debug!(job = %self.name, "job failed");
        time
    }
}
