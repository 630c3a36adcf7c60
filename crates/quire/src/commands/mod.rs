//! CLI command implementations.

pub(crate) mod package_list;
pub(crate) mod paths;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use package_list::PackageListArgs;
pub(crate) use paths::PathsArgs;
pub(crate) use resolve::ResolveArgs;

/// Arguments shared by all commands.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Module name (overrides config).
    #[arg(long)]
    module_name: Option<String>,

    /// Link extension with leading dot, empty for none (overrides config).
    #[arg(long)]
    extension: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CommonArgs {
    /// Load the configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            module_name: self.module_name.clone(),
            extension: self.extension.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
