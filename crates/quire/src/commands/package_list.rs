//! `quire package-list` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_location::PackageList;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline;

/// Arguments for the package-list command.
#[derive(Args)]
pub(crate) struct PackageListArgs {
    /// Write the list to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl PackageListArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let resolver = pipeline::build_resolver(&config)?;

        let list = PackageList::from_graph(
            resolver.graph(),
            &config.module_name,
            resolver.extension(),
        );

        match &self.output {
            Some(path) => {
                std::fs::write(path, list.to_string())?;
                output.info(&format!("Packages: {}", list.packages().len()));
                output.success(&format!("Package list written to {}", path.display()));
            }
            None => output.data(list.to_string().trim_end())?,
        }
        Ok(())
    }
}
