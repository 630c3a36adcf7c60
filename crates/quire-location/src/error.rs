//! Location resolution errors.

use quire_model::{Dri, SourceSet};
use quire_pages::PageId;

/// Error returned when location indices cannot be built or a page is unknown.
///
/// Everything except `UnknownPage` is a modeling error of the page graph and
/// is reported by [`LocationResolver::new`](crate::LocationResolver::new).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LocationError {
    /// The page id does not belong to the resolver's page graph.
    #[error("Page {0} does not belong to the current page graph, cannot compute its path")]
    UnknownPage(PageId),
    /// Two children of one page escape to the same path segment.
    #[error("Pages '{first}' and '{second}' under '{parent}' both map to path segment '{segment}'")]
    SegmentCollision {
        /// Name of the common parent page.
        parent: String,
        /// Name of the page that claimed the segment first.
        first: String,
        /// Name of the colliding page.
        second: String,
        /// The escaped segment.
        segment: String,
    },
    /// Two pages claim to be the primary location of one identity.
    #[error("Multiple pages associated with key {dri}/{source_set}: '{first}' and '{second}'")]
    DuplicatePrimary {
        dri: Dri,
        source_set: SourceSet,
        /// Name of the page registered first.
        first: String,
        /// Name of the conflicting page.
        second: String,
    },
    /// Two pages hold an anchor for one identity.
    #[error("Pages '{first}' and '{second}' both anchor {dri} for source set '{source_set}'")]
    ConflictingAnchor {
        dri: Dri,
        source_set: SourceSet,
        /// Name of the page registered first.
        first: String,
        /// Name of the conflicting page.
        second: String,
    },
}
