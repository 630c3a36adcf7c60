//! Page nodes.

use std::collections::BTreeSet;
use std::fmt;

use quire_model::{Dri, SourceSet};

use crate::ContentNode;

/// Identifier of a page within one [`PageGraph`](crate::PageGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub(crate) usize);

impl PageId {
    /// Position of the page in the graph's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Synthetic aggregate root above several modules.
    Root,
    Module,
    /// Package page; its name is used verbatim as a path segment.
    Package,
    Classlike,
}

/// One routable output unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Display name, also the source of the page's path segment.
    pub name: String,
    pub kind: PageKind,
    /// Identities documented by this page. Normally exactly one; empty or
    /// several only for synthetic pages.
    pub dris: BTreeSet<Dri>,
    /// Source sets the page is valid for.
    pub source_sets: BTreeSet<SourceSet>,
    pub content: ContentNode,
}

impl Page {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PageKind, content: ContentNode) -> Self {
        Self {
            name: name.into(),
            kind,
            dris: BTreeSet::new(),
            source_sets: BTreeSet::new(),
            content,
        }
    }

    #[must_use]
    pub fn with_dri(mut self, dri: Dri) -> Self {
        self.dris.insert(dri);
        self
    }

    #[must_use]
    pub fn with_source_sets(mut self, source_sets: impl IntoIterator<Item = SourceSet>) -> Self {
        self.source_sets.extend(source_sets);
        self
    }
}
