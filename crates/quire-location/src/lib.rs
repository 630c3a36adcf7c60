//! Page path and cross-reference resolution for Quire.
//!
//! This crate provides:
//! - [`LocationResolver`]: Output paths of pages and context-relative links to symbols
//! - [`SegmentEscaper`] / [`DefaultEscaper`]: Filesystem-safe path segments
//! - [`ExternalLocationResolver`]: Fallback for symbols documented outside the run
//! - [`PackageList`]: Manifest of documented packages for other runs to link against
//!
//! # Architecture
//!
//! [`LocationResolver::new`] derives three indices from an immutable
//! [`PageGraph`](quire_pages::PageGraph) in full traversals:
//! - path index: page → absolute segment path
//! - primary index: (DRI, source set) → page documenting the DRI
//! - anchor index: (DRI, source set) → page holding an anchor for the DRI
//!
//! Every modeling error (duplicate primary page, conflicting anchor, sibling
//! segment collision) surfaces from the constructor. Queries afterwards take
//! `&self` and never fail for unknown symbols: they fall back to the
//! external resolver.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//!
//! use quire_location::{LocationConfig, LocationResolver, NoExternalLocations};
//! use quire_model::{Dri, SourceSet};
//! use quire_pages::{ContentNode, Page, PageGraphBuilder, PageKind};
//!
//! let jvm = SourceSet::new("jvm");
//! let page = |name: &str, kind, dri: Dri| {
//!     Page::new(name, kind, ContentNode::group(Vec::new()))
//!         .with_dri(dri)
//!         .with_source_sets([jvm.clone()])
//! };
//!
//! let mut builder = PageGraphBuilder::new();
//! let root = builder.add_page(page("core", PageKind::Module, Dri::for_module("core")), None)?;
//! let package = builder.add_page(page("a.b", PageKind::Package, Dri::for_package("a.b")), Some(root))?;
//! let foo = builder.add_page(
//!     page("Foo", PageKind::Classlike, Dri::for_classlike("a.b", "Foo")),
//!     Some(package),
//! )?;
//! let graph = Arc::new(builder.build()?);
//!
//! let resolver = LocationResolver::new(graph, LocationConfig::new(NoExternalLocations))?;
//!
//! assert_eq!(resolver.resolve_page(foo, None, false)?, "a.b/-foo.html");
//! assert_eq!(resolver.resolve_page(package, Some(foo), true)?, "index");
//! assert_eq!(
//!     resolver.resolve_dri(&Dri::for_classlike("a.b", "Foo"), &BTreeSet::from([jvm]), Some(root)),
//!     Some("a.b/-foo.html".to_owned())
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod escape;
mod external;
mod index;
mod package_list;
mod paths;
mod resolver;

pub use error::LocationError;
pub use escape::{
    DefaultEscaper, PAGE_WITH_CHILDREN_SUFFIX, RESERVED_FILENAMES, ROOT_FILENAME, SegmentEscaper,
    identifier_to_filename,
};
pub use external::{
    ExternalDocumentationLink, ExternalLocationResolver, ExternalLocations, NoExternalLocations,
};
pub use package_list::PackageList;
pub use resolver::{DEFAULT_EXTENSION, LocationConfig, LocationResolver};
