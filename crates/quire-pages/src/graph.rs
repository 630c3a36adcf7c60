//! Page graph storage and construction.

use crate::{Page, PageId};

/// Error returned when a page graph cannot be built.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// No page was added.
    #[error("Page graph has no root page")]
    MissingRoot,
    /// A second page was added without a parent.
    #[error("Page '{name}' has no parent but '{root}' is already the root")]
    MultipleRoots {
        /// Name of the rejected page.
        name: String,
        /// Name of the existing root.
        root: String,
    },
    /// A page named a parent that is not in the graph.
    #[error("Parent {parent} of page '{name}' is not in the graph")]
    UnknownParent {
        /// The missing parent id.
        parent: PageId,
        /// Name of the rejected page.
        name: String,
    },
}

/// Immutable tree of pages.
///
/// Pages live in a flat arena. `children` is the ownership relation,
/// `parents` its exact inverse; both are indexed by [`PageId`]. Every page
/// except the root has exactly one parent.
#[derive(Debug)]
pub struct PageGraph {
    pages: Vec<Page>,
    children: Vec<Vec<PageId>>,
    parents: Vec<Option<PageId>>,
    root: PageId,
}

impl PageGraph {
    #[must_use]
    pub fn root(&self) -> PageId {
        self.root
    }

    /// Get page by id, `None` if the id belongs to another graph.
    #[must_use]
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.0)
    }

    #[must_use]
    pub fn contains(&self, id: PageId) -> bool {
        id.0 < self.pages.len()
    }

    /// Children of a page in insertion order. Empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: PageId) -> &[PageId] {
        self.children.get(id.0).map_or(&[][..], Vec::as_slice)
    }

    /// Parent of a page, `None` for the root and unknown ids.
    #[must_use]
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// Whether the page has no child pages.
    #[must_use]
    pub fn is_leaf(&self, id: PageId) -> bool {
        self.children(id).is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`: a built graph has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages with their ids, in insertion order.
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &Page)> {
        self.pages.iter().enumerate().map(|(i, page)| (PageId(i), page))
    }

    /// All page ids in pre-order from the root.
    #[must_use]
    pub fn descendants(&self) -> Vec<PageId> {
        let mut order = Vec::with_capacity(self.pages.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }
}

/// Builder for constructing [`PageGraph`] instances.
///
/// A page's parent must already be in the builder when the page is added,
/// which keeps the parent relation acyclic and the exact inverse of the child
/// lists.
#[derive(Debug, Default)]
pub struct PageGraphBuilder {
    pages: Vec<Page>,
    children: Vec<Vec<PageId>>,
    parents: Vec<Option<PageId>>,
    root: Option<PageId>,
}

impl PageGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page under `parent`, or as the root when `parent` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::MultipleRoots` if a root already exists and
    /// `parent` is `None`, `GraphError::UnknownParent` if `parent` was not
    /// returned by this builder.
    pub fn add_page(&mut self, page: Page, parent: Option<PageId>) -> Result<PageId, GraphError> {
        let id = PageId(self.pages.len());

        match parent {
            Some(parent) if parent.0 >= self.pages.len() => {
                return Err(GraphError::UnknownParent {
                    parent,
                    name: page.name,
                });
            }
            Some(parent) => self.children[parent.0].push(id),
            None => {
                if let Some(root) = self.root {
                    return Err(GraphError::MultipleRoots {
                        name: page.name,
                        root: self.pages[root.0].name.clone(),
                    });
                }
                self.root = Some(id);
            }
        }

        self.pages.push(page);
        self.children.push(Vec::new());
        self.parents.push(parent);

        Ok(id)
    }

    /// Build the [`PageGraph`].
    ///
    /// # Errors
    ///
    /// Returns `GraphError::MissingRoot` if no page was added.
    pub fn build(self) -> Result<PageGraph, GraphError> {
        let root = self.root.ok_or(GraphError::MissingRoot)?;
        tracing::debug!(page_count = self.pages.len(), "Page graph built");

        Ok(PageGraph {
            pages: self.pages,
            children: self.children,
            parents: self.parents,
            root,
        })
    }
}
