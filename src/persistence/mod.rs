//! Persistence layer for pipeline run history

pub mod store;

pub use store::JsonFileStore;

use crate::core::{JobState, PipelineState, PipelineStatus};
use crate::error::StatusError;
use crate::serial::Serial;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Summary of a stored pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run ID assigned at save time
    pub run_id: Uuid,

    /// Pipeline name
    pub pipeline: String,

    /// Pipeline state at save time
    pub state: PipelineState,

    /// When the pipeline started (if started)
    pub start_time: Option<String>,

    /// When the pipeline completed (if completed)
    pub complete_time: Option<String>,

    /// Total number of jobs
    pub jobs_total: usize,

    /// Number of completed jobs
    pub jobs_complete: usize,

    /// Number of failed jobs
    pub jobs_failed: usize,
}

impl RunSummary {
    /// Summarize a status aggregate stored under `run_id`
    pub fn of(run_id: Uuid, status: &PipelineStatus) -> Self {
        let jobs_complete = status
            .jobs
            .iter()
            .filter(|job| job.state == JobState::Complete)
            .count();
        let jobs_failed = status
            .jobs
            .iter()
            .filter(|job| job.state == JobState::Failed)
            .count();

        Self {
            run_id,
            pipeline: status.name.clone(),
            state: status.state,
            start_time: status.start_time.clone(),
            complete_time: status.complete_time.clone(),
            jobs_total: status.jobs.len(),
            jobs_complete,
            jobs_failed,
        }
    }
}

/// Storage backend for externalized pipeline status documents
///
/// Stores hold projected documents, not live aggregates; loading
/// reconstructs through the same contract the wire representation uses.
pub trait StatusStore {
    /// Persist a status snapshot under a fresh run ID
    fn save(&mut self, status: &PipelineStatus) -> Result<Uuid, StatusError>;

    /// Load a stored run by ID
    fn load(&self, run_id: Uuid) -> Result<Option<PipelineStatus>, StatusError>;

    /// Summaries of all stored runs, most recently started first
    fn list(&self) -> Result<Vec<RunSummary>, StatusError>;
}

/// In-memory store (for testing or ephemeral use)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    runs: HashMap<Uuid, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStore for InMemoryStore {
    fn save(&mut self, status: &PipelineStatus) -> Result<Uuid, StatusError> {
        let run_id = Uuid::new_v4();
        self.runs.insert(run_id, status.to_value()?);
        Ok(run_id)
    }

    fn load(&self, run_id: Uuid) -> Result<Option<PipelineStatus>, StatusError> {
        match self.runs.get(&run_id) {
            Some(value) => Ok(Some(PipelineStatus::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<RunSummary>, StatusError> {
        let mut summaries = Vec::new();
        for (run_id, value) in &self.runs {
            let status = PipelineStatus::from_value(value.clone())?;
            summaries.push(RunSummary::of(*run_id, &status));
        }
        summaries.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(summaries)
    }
}
