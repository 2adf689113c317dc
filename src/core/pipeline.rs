//! Pipeline-level status aggregate

use crate::core::clock::{self, Clock};
use crate::core::job::JobStatus;
use crate::core::message::StatusMessage;
use crate::core::state::PipelineState;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callback invoked by [`PipelineStatus::publish`] with the live aggregate
pub type PublishCallback = Box<dyn Fn(&PipelineStatus) -> Result<()> + Send + Sync>;

/// Records the status of a pipeline and the jobs that make it up
///
/// The aggregate owns its jobs and message log; one logical owner is
/// expected to perform all mutations in sequence. Field declaration order
/// is the field order of the serialized document. The active-job pointer
/// and the publish callback are runtime wiring and do not survive
/// deserialization.
#[derive(Serialize, Deserialize)]
pub struct PipelineStatus {
    /// The name of the pipeline
    pub name: String,

    /// Current lifecycle state
    pub state: PipelineState,

    /// When the pipeline was started, or None if not started
    pub start_time: Option<String>,

    /// When the pipeline was completed, or None if not completed
    pub complete_time: Option<String>,

    /// When the pipeline failed, or None if not failed
    pub fail_time: Option<String>,

    /// Status updates recorded for the pipeline itself, in insertion order
    pub messages: Vec<StatusMessage>,

    /// Status of the jobs that make up the pipeline, in creation order
    pub jobs: Vec<JobStatus>,

    /// Index of the most recently added job; stays valid because `jobs`
    /// is append-only
    #[serde(skip)]
    active_job: Option<usize>,

    #[serde(skip)]
    publish_callback: Option<PublishCallback>,

    #[serde(skip, default = "crate::core::clock::system")]
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineStatus")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("start_time", &self.start_time)
            .field("complete_time", &self.complete_time)
            .field("fail_time", &self.fail_time)
            .field("messages", &self.messages)
            .field("jobs", &self.jobs)
            .field("active_job", &self.active_job)
            .field("publish_callback", &self.publish_callback.is_some())
            .finish()
    }
}

// Equality covers the externally represented fields only.
impl PartialEq for PipelineStatus {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.state == other.state
            && self.start_time == other.start_time
            && self.complete_time == other.complete_time
            && self.fail_time == other.fail_time
            && self.messages == other.messages
            && self.jobs == other.jobs
    }
}

impl PipelineStatus {
    /// Construct a pipeline in QUEUED reading time from the system clock
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, clock::system())
    }

    /// Construct a pipeline in QUEUED reading time from `clock`
    pub fn with_clock(name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            state: PipelineState::Queued,
            start_time: None,
            complete_time: None,
            fail_time: None,
            messages: Vec::new(),
            jobs: Vec::new(),
            active_job: None,
            publish_callback: None,
            clock,
        }
    }

    /// Register the callback invoked by [`publish`](Self::publish)
    ///
    /// A single slot: registering a new callback discards the old one.
    pub fn set_publish_callback<F>(&mut self, callback: F)
    where
        F: Fn(&PipelineStatus) -> Result<()> + Send + Sync + 'static,
    {
        self.publish_callback = Some(Box::new(callback));
    }

    /// Invoke the registered publish callback with the live aggregate
    ///
    /// Runs synchronously on the caller's context; a no-op when no
    /// callback is registered. Callback errors propagate unchanged, with
    /// no retry.
    pub fn publish(&self) -> Result<()> {
        match &self.publish_callback {
            Some(callback) => callback(self),
            None => Ok(()),
        }
    }

    /// The most recently added job, or None if no job has been added
    pub fn active_job(&self) -> Option<&JobStatus> {
        self.active_job.map(|index| &self.jobs[index])
    }

    /// Mutable access to the most recently added job
    pub fn active_job_mut(&mut self) -> Option<&mut JobStatus> {
        match self.active_job {
            Some(index) => self.jobs.get_mut(index),
            None => None,
        }
    }

    /// Add a new QUEUED job with the given name and make it active
    ///
    /// The previously active job is not retired; completing or failing it
    /// first is the caller's responsibility.
    pub fn add_job(&mut self, name: impl Into<String>) -> &mut JobStatus {
        let job = JobStatus::with_clock(name, Arc::clone(&self.clock));
        debug!(pipeline = %self.name, job = %job.name, "job added");

        let index = self.jobs.len();
        self.jobs.push(job);
        self.active_job = Some(index);
        &mut self.jobs[index]
    }

    /// Append a status message to the pipeline's own log; returns its
    /// timestamp
    pub fn add_message(&mut self, message: impl Into<String>) -> String {
        let status_message = StatusMessage::now(message, self.clock.as_ref());
        let time = status_message.time.clone();
        self.messages.push(status_message);
        time
    }

    /// Mark the pipeline as started
    pub fn start(&mut self) -> String {
        self.start_with("Pipeline started")
    }

    /// Mark the pipeline as started and record the given message
    pub fn start_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.start_time = Some(time.clone());
        self.state = PipelineState::Running;
        debug!(pipeline = %self.name, "pipeline started");
        time
    }

    /// Mark the pipeline as complete
    pub fn complete(&mut self) -> String {
        self.complete_with("Pipeline completed")
    }

    /// Mark the pipeline as complete and record the given message
    pub fn complete_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.complete_time = Some(time.clone());
        self.state = PipelineState::Complete;
        debug!(pipeline = %self.name, "pipeline completed");
        time
    }

    /// Mark the pipeline as failed
    pub fn fail(&mut self) -> String {
        self.fail_with("Pipeline failed")
    }

    /// Mark the pipeline as failed and record the given message
    pub fn fail_with(&mut self, message: impl Into<String>) -> String {
        let time = self.add_message(message);
        self.fail_time = Some(time.clone());
        self.state = PipelineState::Failed;
        debug!(pipeline = %self.name, "pipeline failed");
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::TickClock;
    use crate::core::state::JobState;
    use anyhow::anyhow;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tick_clock() -> Arc<dyn Clock> {
        Arc::new(TickClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_new_pipeline_is_queued_and_empty() {
        let status = PipelineStatus::new("demo");
        assert_eq!(status.name, "demo");
        assert_eq!(status.state, PipelineState::Queued);
        assert!(status.start_time.is_none());
        assert!(status.messages.is_empty());
        assert!(status.jobs.is_empty());
        assert!(status.active_job().is_none());
    }

    #[test]
    fn test_add_job_activates_latest() {
        let mut status = PipelineStatus::with_clock("demo", tick_clock());

        status.add_job("extract");
        assert_eq!(status.jobs.len(), 1);
        assert_eq!(status.active_job().map(|j| j.name.as_str()), Some("extract"));

        // The new job becomes active even though the previous one is
        // still running.
        if let Some(job) = status.active_job_mut() {
            job.start();
        }
        status.add_job("transform");
        assert_eq!(status.jobs.len(), 2);

        let active = status.active_job().unwrap();
        assert_eq!(active.name, "transform");
        assert_eq!(active.state, JobState::Queued);
        assert_eq!(status.jobs[0].state, JobState::Running);
    }

    #[test]
    fn test_jobs_and_messages_preserve_insertion_order() {
        let mut status = PipelineStatus::with_clock("demo", tick_clock());
        for name in ["a", "b", "c"] {
            status.add_job(name);
        }
        status.add_message("first");
        status.add_message("second");

        let job_names: Vec<&str> = status.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(job_names, ["a", "b", "c"]);

        let texts: Vec<&str> = status.messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn test_pipeline_transitions_record_milestones() {
        let mut status = PipelineStatus::with_clock("demo", tick_clock());

        let started = status.start();
        assert_eq!(status.state, PipelineState::Running);
        assert_eq!(status.start_time.as_deref(), Some(started.as_str()));
        assert_eq!(status.messages[0].message, "Pipeline started");

        let completed = status.complete();
        assert_eq!(status.state, PipelineState::Complete);
        assert_eq!(status.complete_time.as_deref(), Some(completed.as_str()));
        assert_eq!(status.messages[1].message, "Pipeline completed");
    }

    #[test]
    fn test_publish_without_callback_is_noop() {
        let status = PipelineStatus::new("demo");
        assert!(status.publish().is_ok());
    }

    #[test]
    fn test_publish_invokes_callback_with_live_aggregate() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut status = PipelineStatus::with_clock("demo", tick_clock());
        status.set_publish_callback(move |snapshot| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert_eq!(snapshot.name, "demo");
            assert_eq!(snapshot.state, PipelineState::Running);
            Ok(())
        });

        status.start();
        status.publish().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registering_callback_replaces_previous() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut status = PipelineStatus::new("demo");
        let counter = Arc::clone(&first);
        status.set_publish_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let counter = Arc::clone(&second);
        status.set_publish_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        status.publish().unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publish_error_propagates_unchanged() {
        let mut status = PipelineStatus::new("demo");
        status.set_publish_callback(|_| Err(anyhow!("monitoring backend unreachable")));

        let err = status.publish().unwrap_err();
        assert!(err.to_string().contains("monitoring backend unreachable"));
    }
}
