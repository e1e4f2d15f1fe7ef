#![deny(missing_docs)]

//! # Refbundle CLI
//!
//! Command Line Interface for the refbundle toolkit.
//!
//! Supported Commands:
//! - `bundle`: Inlines every external reference of a document under `x-ext`.
//! - `diff`: Lists the add / update / delete edits between two documents.

use clap::{Parser, Subcommand};
use error::CliResult;
use tracing_subscriber::EnvFilter;

mod bundle;
mod diff;
mod error;
mod output;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI bundling and diff toolkit")]
struct Cli {
    /// Log every resolution step (overrides RUST_LOG).
    #[clap(long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bundle a document and its external references into one file.
    Bundle(bundle::BundleArgs),
    /// Compute the differences between two documents.
    Diff(diff::DiffArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Bundle(args) => bundle::execute(args).await?,
        Commands::Diff(args) => diff::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_bundle_flags() {
        let cli = Cli::parse_from([
            "refbundle",
            "bundle",
            "openapi.yaml",
            "--tree-shake",
            "--header",
            "api.example.com=X-Token:abc",
            "--header",
            "api.example.com=X-Other:def",
            "--concurrency",
            "3",
        ]);
        match cli.command {
            Commands::Bundle(args) => {
                assert_eq!(args.input, "openapi.yaml");
                assert!(args.tree_shake);
                assert!(!args.url_map);
                assert_eq!(args.headers.len(), 2);
                assert_eq!(args.concurrency, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
