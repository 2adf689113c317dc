//! CLI output formatting

use crate::core::{JobState, JobStatus, PipelineState, StatusMessage};
use crate::persistence::RunSummary;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Format a pipeline state for display
pub fn format_pipeline_state(state: PipelineState) -> String {
    match state {
        PipelineState::Ready => style("READY").dim().to_string(),
        PipelineState::Queued => style("QUEUED").dim().to_string(),
        PipelineState::Running => style("RUNNING").yellow().to_string(),
        PipelineState::Failed => style("FAILED").red().to_string(),
        PipelineState::Complete => style("COMPLETE").green().to_string(),
    }
}

/// Format a job state for display
pub fn format_job_state(state: JobState) -> String {
    match state {
        JobState::Ready => style("READY").dim().to_string(),
        JobState::Queued => style("QUEUED").dim().to_string(),
        JobState::Skipped => style("SKIPPED").dim().to_string(),
        JobState::Running => style("RUNNING").yellow().to_string(),
        JobState::Failed => style("FAILED").red().to_string(),
        JobState::Complete => style("COMPLETE").green().to_string(),
    }
}

/// One-line summary of a stored run
pub fn format_run_summary(summary: &RunSummary) -> String {
    let status_icon = match summary.state {
        PipelineState::Complete => CHECK,
        PipelineState::Failed => CROSS,
        PipelineState::Running => SPINNER,
        _ => INFO,
    };

    format!(
        "{} {} - {} - {} ({}/{} jobs)",
        status_icon,
        style(&summary.run_id.to_string()[..8]).dim(),
        style(&summary.pipeline).bold(),
        format_pipeline_state(summary.state),
        summary.jobs_complete,
        summary.jobs_total,
    )
}

/// One-line summary of a job within a pipeline
pub fn format_job_line(job: &JobStatus) -> String {
    let status_icon = match job.state {
        JobState::Complete => CHECK,
        JobState::Failed => CROSS,
        JobState::Running => SPINNER,
        JobState::Skipped => WARN,
        _ => INFO,
    };

    format!(
        "{} {} - {}",
        status_icon,
        style(&job.name).bold(),
        format_job_state(job.state)
    )
}

/// Format a message log entry
pub fn format_message(message: &StatusMessage) -> String {
    format!("{} {}", style(&message.time).dim(), message.message)
}
