//! Quire CLI - documentation page graph and link resolution.
//!
//! Provides commands for:
//! - `paths`: Print the output path of every page as JSON
//! - `resolve`: Resolve a DRI to a link
//! - `package-list`: Write the package list of the documented module

mod commands;
mod error;
mod output;
mod pipeline;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PackageListArgs, PathsArgs, ResolveArgs};
use output::Output;

/// Quire - documentation page graph and link resolution.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the output path of every page.
    Paths(PathsArgs),
    /// Resolve a DRI to a link.
    Resolve(ResolveArgs),
    /// Write the package list of the documented module.
    PackageList(PackageListArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Paths(args) => args.common.verbose,
            Self::Resolve(args) => args.common.verbose,
            Self::PackageList(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Paths(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::PackageList(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
