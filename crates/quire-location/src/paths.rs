//! Absolute segment paths of pages.

use std::collections::HashMap;

use quire_pages::{PageGraph, PageId};

use crate::{LocationError, SegmentEscaper};

/// Page → absolute segment path, indexed by [`PageId`].
///
/// The root's path is empty. Every other path is its parent's path plus the
/// page's escaped segment.
#[derive(Debug)]
pub(crate) struct PathIndex {
    paths: Vec<Vec<String>>,
}

impl PathIndex {
    /// Compute every path in one top-down traversal.
    ///
    /// Parents precede their children in pre-order, so a parent's path is
    /// always known when its children are visited.
    pub(crate) fn build(
        graph: &PageGraph,
        escaper: &dyn SegmentEscaper,
    ) -> Result<Self, LocationError> {
        let mut paths = vec![Vec::new(); graph.len()];

        for id in graph.descendants() {
            let mut seen: HashMap<String, PageId> = HashMap::new();
            for &child in graph.children(id) {
                let Some(page) = graph.page(child) else {
                    continue;
                };
                let segment = escaper.segment(page);

                if let Some(&first) = seen.get(&segment) {
                    return Err(LocationError::SegmentCollision {
                        parent: name_of(graph, id),
                        first: name_of(graph, first),
                        second: page.name.clone(),
                        segment,
                    });
                }
                seen.insert(segment.clone(), child);

                let mut path = paths[id.index()].clone();
                path.push(segment);
                paths[child.index()] = path;
            }
        }

        Ok(Self { paths })
    }

    pub(crate) fn get(&self, id: PageId) -> Option<&[String]> {
        self.paths.get(id.index()).map(Vec::as_slice)
    }
}

fn name_of(graph: &PageGraph, id: PageId) -> String {
    graph.page(id).map(|p| p.name.clone()).unwrap_or_default()
}
