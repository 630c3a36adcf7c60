//! Page graph for Quire.
//!
//! This crate provides:
//! - [`PageGraph`]: Immutable ownership tree of pages with a separate parent relation
//! - [`PageGraphBuilder`]: One-pass construction with parent validation
//! - [`translate`]: Builds the graph from a merged declaration forest
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` addressed by [`PageId`]. Child lists
//! and the parent relation are separate tables indexed by the same id, so
//! pages never hold references to each other and the tree has no cycles by
//! construction.
//!
//! # Example
//!
//! ```
//! use quire_pages::{ContentNode, Page, PageGraphBuilder, PageKind};
//!
//! let mut builder = PageGraphBuilder::new();
//! let root = builder
//!     .add_page(Page::new("core", PageKind::Module, ContentNode::group(Vec::new())), None)
//!     .unwrap();
//! let package = builder
//!     .add_page(Page::new("a.b", PageKind::Package, ContentNode::group(Vec::new())), Some(root))
//!     .unwrap();
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.parent(package), Some(root));
//! assert_eq!(graph.children(root), &[package]);
//! ```

mod content;
mod graph;
mod page;
mod translate;

pub use content::{ContentKind, ContentNode, Descendants};
pub use graph::{GraphError, PageGraph, PageGraphBuilder};
pub use page::{Page, PageId, PageKind};
pub use translate::translate;
