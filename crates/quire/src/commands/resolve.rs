//! `quire resolve` command implementation.

use std::collections::BTreeSet;

use clap::Args;
use quire_location::LocationResolver;
use quire_model::{Dri, SourceSet};
use quire_pages::PageId;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// DRI to resolve, in `package/classNames/callable/extra` form.
    dri: String,

    /// DRI of the page to link from (default: the root).
    #[arg(long)]
    from: Option<String>,

    /// Source sets to resolve for (default: all configured source sets).
    #[arg(short, long = "source-set")]
    source_sets: Vec<String>,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let resolver = pipeline::build_resolver(&config)?;

        let dri: Dri = self.dri.parse()?;
        let context = match &self.from {
            Some(from) => Some(find_page(&resolver, &from.parse()?)?),
            None => None,
        };
        let source_sets: BTreeSet<SourceSet> = if self.source_sets.is_empty() {
            pipeline::source_set_order(&config).iter().cloned().collect()
        } else {
            self.source_sets.iter().map(SourceSet::new).collect()
        };

        match resolver.resolve_dri(&dri, &source_sets, context) {
            Some(location) => output.data(&location)?,
            None => output.warning(&format!("No location for {dri}")),
        }
        Ok(())
    }
}

/// The page documenting `dri`.
fn find_page(resolver: &LocationResolver, dri: &Dri) -> Result<PageId, CliError> {
    resolver
        .graph()
        .pages()
        .find(|(_, page)| page.dris.contains(dri))
        .map(|(id, _)| id)
        .ok_or_else(|| CliError::Validation(format!("No page documents {dri}")))
}
