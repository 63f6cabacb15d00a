//! # repoguard CLI entry point
//!
//! Parses command-line arguments, builds the repository context once and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repoguard_cli::casing::{run_casing, CasingArgs};
use repoguard_cli::filters::{run_filters, FiltersArgs};

/// Monorepo convention checks.
///
/// Validates that solution filters list every project they transitively
/// depend on, and that paths match their on-disk casing.
#[derive(Parser, Debug)]
#[command(name = "repoguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository root. Discovered from the current directory when omitted.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check solution filters for broken paths and missing dependencies.
    Filters(FiltersArgs),

    /// Check that paths match the letter casing stored on disk.
    Casing(CasingArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = match repoguard_cli::build_context(cli.root.as_deref(), cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    tracing::debug!(repo_root = %ctx.root().display(), "resolved repository root");

    let result = match cli.command {
        Commands::Filters(args) => run_filters(&args, &ctx),
        Commands::Casing(args) => run_casing(&args, &ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
