//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{HistoryCommand, ImportCommand, ShowCommand, ValidateCommand};

/// Inspect and archive pipeline status documents
#[derive(Debug, Parser, Clone)]
#[command(name = "pipetrack")]
#[command(version = "0.1.0")]
#[command(about = "Status tracking for multi-step pipeline runs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show a status document
    Show(ShowCommand),

    /// Validate a status document
    Validate(ValidateCommand),

    /// Import a status document into the run store
    Import(ImportCommand),

    /// Show stored run history
    History(HistoryCommand),
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
