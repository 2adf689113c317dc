use anyhow::{bail, Context, Result};
use pipetrack::cli::commands::{HistoryCommand, ImportCommand, ShowCommand, ValidateCommand};
use pipetrack::cli::output::*;
use pipetrack::cli::{Cli, Command};
use pipetrack::{JsonFileStore, PipelineStatus, Serial, StatusStore};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Show(cmd) => show_status(cmd)?,
        Command::Validate(cmd) => validate_status(cmd)?,
        Command::Import(cmd) => import_status(cmd)?,
        Command::History(cmd) => show_history(cmd)?,
    }

    Ok(())
}

fn load_status(cmd: &ShowCommand) -> Result<Option<PipelineStatus>> {
    if let Some(id_str) = &cmd.id {
        let run_id = Uuid::parse_str(id_str).context("Invalid run ID format")?;
        let store = JsonFileStore::with_default_path()?;
        Ok(store.load(run_id)?)
    } else if let Some(file) = &cmd.file {
        let status =
            PipelineStatus::read_json(file).context("Failed to load status document")?;
        Ok(Some(status))
    } else {
        bail!("either a file or a run ID is required");
    }
}

fn show_status(cmd: &ShowCommand) -> Result<()> {
    let status = match load_status(cmd)? {
        Some(status) => status,
        None => {
            println!("{} Run not found", WARN);
            return Ok(());
        }
    };

    if cmd.json {
        println!("{}", status.to_json()?);
        return Ok(());
    }

    println!("{} {}", INFO, style(&status.name).bold());
    println!("  State: {}", format_pipeline_state(status.state));
    if let Some(start) = &status.start_time {
        println!("  Started: {}", style(start).dim());
    }
    if let Some(complete) = &status.complete_time {
        println!("  Completed: {}", style(complete).dim());
    }
    if let Some(fail) = &status.fail_time {
        println!("  Failed: {}", style(fail).dim());
    }

    if !status.jobs.is_empty() {
        println!("\n  Jobs:");
        for job in &status.jobs {
            println!("    {}", format_job_line(job));
            if cmd.messages {
                for message in &job.messages {
                    println!("      {}", format_message(message));
                }
            }
        }
    }

    if cmd.messages && !status.messages.is_empty() {
        println!("\n  Messages:");
        for message in &status.messages {
            println!("    {}", format_message(message));
        }
    }

    Ok(())
}

fn validate_status(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating status document...", INFO);

    let raw = std::fs::read_to_string(&cmd.file).context("Failed to read status document")?;
    match PipelineStatus::from_json(&raw) {
        Ok(status) => {
            println!("{} Status document is valid!", CHECK);
            println!("  Pipeline: {}", style(&status.name).bold());
            println!("  State: {}", format_pipeline_state(status.state));
            println!("  Jobs: {}", style(status.jobs.len()).cyan());
            println!("  Messages: {}", style(status.messages.len()).cyan());
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn import_status(cmd: &ImportCommand) -> Result<()> {
    let status =
        PipelineStatus::read_json(&cmd.file).context("Failed to load status document")?;

    let mut store = JsonFileStore::with_default_path()?;
    let run_id = store.save(&status)?;

    println!(
        "{} Imported {} (ID: {})",
        CHECK,
        style(&status.name).bold(),
        style(&run_id.to_string()[..8]).dim()
    );

    Ok(())
}

fn show_history(cmd: &HistoryCommand) -> Result<()> {
    let store = JsonFileStore::with_default_path()?;
    let mut summaries = store.list()?;

    if let Some(pipeline) = &cmd.pipeline {
        summaries.retain(|summary| &summary.pipeline == pipeline);
    }
    summaries.truncate(cmd.limit);

    if summaries.is_empty() {
        println!("{} No runs found", INFO);
        return Ok(());
    }

    if cmd.json {
        let data = serde_json::json!({ "runs": summaries });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{} Run history (showing latest {}):", INFO, cmd.limit);
        for summary in &summaries {
            println!("  {}", format_run_summary(summary));
        }
    }

    Ok(())
}
