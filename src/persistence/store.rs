//! JSON-file-backed run store

use crate::core::PipelineStatus;
use crate::error::StatusError;
use crate::persistence::{RunSummary, StatusStore};
use crate::serial::Serial;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Run store keeping one JSON document per run under a root directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StatusError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the store at the platform-default data directory
    pub fn with_default_path() -> Result<Self, StatusError> {
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(data_dir.join("pipetrack").join("runs"))
    }

    fn run_path(&self, run_id: Uuid) -> PathBuf {
        self.root.join(format!("{run_id}.json"))
    }
}

impl StatusStore for JsonFileStore {
    fn save(&mut self, status: &PipelineStatus) -> Result<Uuid, StatusError> {
        let run_id = Uuid::new_v4();
        status.write_json(self.run_path(run_id))?;
        debug!(run = %run_id, pipeline = %status.name, "run saved");
        Ok(run_id)
    }

    fn load(&self, run_id: Uuid) -> Result<Option<PipelineStatus>, StatusError> {
        let path = self.run_path(run_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(PipelineStatus::read_json(path)?))
    }

    fn list(&self) -> Result<Vec<RunSummary>, StatusError> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();

            // Only `<uuid>.json` entries belong to the store
            let run_id = match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok())
            {
                Some(run_id) if path.extension().is_some_and(|ext| ext == "json") => run_id,
                _ => continue,
            };

            let status = PipelineStatus::read_json(&path)?;
            summaries.push(RunSummary::of(run_id, &status));
        }
        summaries.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(summaries)
    }
}
