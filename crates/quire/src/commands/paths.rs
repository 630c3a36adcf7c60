//! `quire paths` command implementation.

use clap::Args;
use quire_location::{LocationError, LocationResolver};
use quire_pages::{PageId, PageKind};
use rayon::prelude::*;
use serde::Serialize;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

/// One page in the JSON listing.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct PageEntry {
    name: String,
    kind: &'static str,
    path: String,
    /// DRIs documented by the page, in string form.
    dris: Vec<String>,
}

impl PathsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let resolver = pipeline::build_resolver(&config)?;

        let entries = page_entries(&resolver)?;
        output.data(&serde_json::to_string_pretty(&entries)?)?;
        output.success(&format!("Resolved {} page paths", entries.len()));
        Ok(())
    }
}

/// Absolute path of every page in pre-order, computed in parallel.
fn page_entries(resolver: &LocationResolver) -> Result<Vec<PageEntry>, CliError> {
    let graph = resolver.graph();
    let ids: Vec<PageId> = graph.descendants();

    ids.par_iter()
        .map(|&id| -> Result<PageEntry, CliError> {
            let path = resolver.resolve_page(id, None, false)?;
            let page = graph.page(id).ok_or(LocationError::UnknownPage(id))?;
            Ok(PageEntry {
                name: page.name.clone(),
                kind: kind_name(page.kind),
                path,
                dris: page.dris.iter().map(ToString::to_string).collect(),
            })
        })
        .collect()
}

fn kind_name(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Root => "root",
        PageKind::Module => "module",
        PageKind::Package => "package",
        PageKind::Classlike => "classlike",
    }
}
