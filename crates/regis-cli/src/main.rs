//! # regis CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use regis_cli::generate::{run_generate, GenerateArgs};
use regis_cli::import::{run_import, ImportArgs};
use regis_cli::summary::{run_summary, SummaryArgs};

/// REGIS CLI — dataset tooling for the regulatory requirements service.
#[derive(Parser, Debug)]
#[command(name = "regis", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a synthetic dataset and write it as JSON.
    Generate(GenerateArgs),

    /// Print risk and conflict summaries of a dataset file.
    Summary(SummaryArgs),

    /// Replace the PostgreSQL contents with a dataset file.
    Import(ImportArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Summary(args) => run_summary(&args).await,
        Commands::Import(args) => run_import(&args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
