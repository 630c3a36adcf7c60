//! CLI error types.

use std::path::PathBuf;

use quire_config::ConfigError;
use quire_location::LocationError;
use quire_merge::MergeError;
use quire_model::DriParseError;
use quire_pages::GraphError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid declarations in {}: {source}", path.display())]
    Declarations {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Merge(#[from] MergeError),

    #[error("{0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Location(#[from] LocationError),

    #[error("{0}")]
    Dri(#[from] DriParseError),

    #[error("{0}")]
    Validation(String),
}
