//! Pipeline and job lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle states of a pipeline
///
/// Serialized as the UPPERCASE state name; reconstruction rejects
/// anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PipelineState {
    /// Pipeline is defined but not yet registered for execution
    Ready,
    /// Pipeline is registered and waiting to run
    Queued,
    /// Pipeline is currently running
    Running,
    /// Pipeline failed
    Failed,
    /// Pipeline completed successfully
    Complete,
}

/// Lifecycle states of a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    /// Job is defined but not yet registered with a pipeline
    Ready,
    /// Job is registered and waiting to run
    Queued,
    /// Job was skipped
    Skipped,
    /// Job is currently running
    Running,
    /// Job failed
    Failed,
    /// Job completed successfully
    Complete,
}

impl PipelineState {
    /// Check if the pipeline has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Failed | PipelineState::Complete)
    }
}

impl JobState {
    /// Check if the job has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Skipped | JobState::Failed | JobState::Complete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_serialize_uppercase() {
        assert_eq!(
            serde_json::to_string(&PipelineState::Running).unwrap(),
            "\"RUNNING\""
        );
        assert_eq!(
            serde_json::to_string(&JobState::Skipped).unwrap(),
            "\"SKIPPED\""
        );
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let result: Result<JobState, _> = serde_json::from_str("\"EXPLODED\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PipelineState::Queued.is_terminal());
        assert!(!PipelineState::Running.is_terminal());
        assert!(PipelineState::Complete.is_terminal());
        assert!(PipelineState::Failed.is_terminal());

        assert!(!JobState::Ready.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(JobState::Skipped.is_terminal());
        assert!(JobState::Complete.is_terminal());
        assert!(JobState::Failed.is_terminal());
    }
}
