//! CLI command definitions

use clap::Args;

/// Show a status document
#[derive(Debug, Args, Clone)]
pub struct ShowCommand {
    /// Path to a status document
    #[arg(short, long, required_unless_present = "id")]
    pub file: Option<String>,

    /// Load the document from the run store by run ID
    #[arg(long, conflicts_with = "file")]
    pub id: Option<String>,

    /// Include the message logs
    #[arg(long)]
    pub messages: bool,

    /// Output the raw document as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate a status document
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to a status document
    #[arg(short, long)]
    pub file: String,
}

/// Import a status document into the run store
#[derive(Debug, Args, Clone)]
pub struct ImportCommand {
    /// Path to a status document
    #[arg(short, long)]
    pub file: String,
}

/// Show stored run history
#[derive(Debug, Args, Clone)]
pub struct HistoryCommand {
    /// Pipeline name to filter by
    #[arg(short, long)]
    pub pipeline: Option<String>,

    /// Number of recent runs to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
