#![deny(missing_docs)]

//! # Diff Command
//!
//! Prints the structural differences between two JSON / YAML documents.

use crate::error::CliResult;
use crate::output;
use refbundle_core::diff;
use std::path::PathBuf;

/// Arguments for the diff command.
#[derive(clap::Args, Debug, Clone)]
pub struct DiffArgs {
    /// The original document.
    pub old: PathBuf,

    /// The changed document.
    pub new: PathBuf,

    /// Output path for the difference list.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Executes the diff command.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &DiffArgs) -> CliResult<()> {
    let old = output::read_document(&args.old)?;
    let new = output::read_document(&args.new)?;

    let changes = diff(&old, &new);
    tracing::debug!(count = changes.len(), "computed differences");

    let rendered = serde_json::to_value(&changes)?;
    output::write_document(&rendered, args.output.as_deref())
}
