//! Primary and anchor indices keyed by (DRI, source set).

use std::collections::{BTreeSet, HashMap};

use quire_model::{Dri, SourceSet};
use quire_pages::{PageGraph, PageId};

use crate::LocationError;

/// (DRI, source set) → page.
///
/// Registration is an explicit reduction: registering the page already stored
/// under a key is a no-op, any other page is rejected.
#[derive(Debug, Default)]
pub(crate) struct DriIndex {
    entries: HashMap<Dri, HashMap<SourceSet, PageId>>,
}

impl DriIndex {
    /// Register `page` under (`dri`, `source_set`).
    ///
    /// Returns the already registered page on conflict.
    fn register(&mut self, dri: &Dri, source_set: &SourceSet, page: PageId) -> Result<(), PageId> {
        let by_source_set = self.entries.entry(dri.clone()).or_default();
        match by_source_set.get(source_set) {
            Some(&existing) if existing != page => Err(existing),
            Some(_) => Ok(()),
            None => {
                by_source_set.insert(source_set.clone(), page);
                Ok(())
            }
        }
    }

    pub(crate) fn get(&self, dri: &Dri, source_set: &SourceSet) -> Option<PageId> {
        self.entries.get(dri)?.get(source_set).copied()
    }

    /// Number of distinct DRIs.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Index every (DRI, source set) a page represents.
pub(crate) fn build_primary(graph: &PageGraph) -> Result<DriIndex, LocationError> {
    let mut index = DriIndex::default();

    for (id, page) in graph.pages() {
        for dri in &page.dris {
            for source_set in &page.source_sets {
                index.register(dri, source_set, id).map_err(|existing| {
                    LocationError::DuplicatePrimary {
                        dri: dri.clone(),
                        source_set: source_set.clone(),
                        first: name_of(graph, existing),
                        second: page.name.clone(),
                    }
                })?;
            }
        }
    }

    tracing::debug!(dri_count = index.len(), "Primary index built");
    Ok(index)
}

/// Index every anchored content node of every page.
///
/// A node without source sets of its own is registered under its page's.
pub(crate) fn build_anchors(graph: &PageGraph) -> Result<DriIndex, LocationError> {
    let mut index = DriIndex::default();

    for (id, page) in graph.pages() {
        for node in page.content.descendants().filter(|n| n.anchor) {
            let Some(dri) = &node.dri else {
                continue;
            };
            let source_sets: &BTreeSet<SourceSet> = if node.source_sets.is_empty() {
                &page.source_sets
            } else {
                &node.source_sets
            };

            for source_set in source_sets {
                index.register(dri, source_set, id).map_err(|existing| {
                    LocationError::ConflictingAnchor {
                        dri: dri.clone(),
                        source_set: source_set.clone(),
                        first: name_of(graph, existing),
                        second: page.name.clone(),
                    }
                })?;
            }
        }
    }

    tracing::debug!(dri_count = index.len(), "Anchor index built");
    Ok(index)
}

fn name_of(graph: &PageGraph, id: PageId) -> String {
    graph.page(id).map(|p| p.name.clone()).unwrap_or_default()
}
