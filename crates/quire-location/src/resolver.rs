//! Location resolver.

use std::collections::BTreeSet;
use std::iter;
use std::sync::Arc;

use quire_model::{Dri, SourceSet};
use quire_pages::{PageGraph, PageId};

use crate::escape::{DefaultEscaper, PAGE_WITH_CHILDREN_SUFFIX, SegmentEscaper};
use crate::external::ExternalLocationResolver;
use crate::index::{self, DriIndex};
use crate::paths::PathIndex;
use crate::LocationError;

/// Extension appended to resolved page paths unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = ".html";

/// Strategies and settings used by [`LocationResolver`].
pub struct LocationConfig {
    extension: String,
    escaper: Box<dyn SegmentEscaper>,
    external: Box<dyn ExternalLocationResolver>,
}

impl LocationConfig {
    /// Default extension and escaping with the given external fallback.
    #[must_use]
    pub fn new(external: impl ExternalLocationResolver + 'static) -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_owned(),
            escaper: Box::new(DefaultEscaper),
            external: Box::new(external),
        }
    }

    /// Set the extension, including its leading dot. Empty disables it.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_escaper(mut self, escaper: impl SegmentEscaper + 'static) -> Self {
        self.escaper = Box::new(escaper);
        self
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl std::fmt::Debug for LocationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationConfig")
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

/// Outcome of looking a DRI up across a set of source sets.
#[derive(Debug, PartialEq, Eq)]
enum Lookup {
    /// No source set has an entry.
    Missing,
    /// Every source set maps to this page.
    Single(PageId),
    /// Some source sets have no entry; the others agree.
    Partial,
    /// Source sets map to different pages.
    Inconsistent(Vec<PageId>),
}

impl Lookup {
    fn find(index: &DriIndex, dri: &Dri, source_sets: &BTreeSet<SourceSet>) -> Self {
        let mut found: Vec<PageId> = Vec::with_capacity(1);
        let mut missing = false;

        for source_set in source_sets {
            match index.get(dri, source_set) {
                Some(page) if !found.contains(&page) => found.push(page),
                Some(_) => {}
                None => missing = true,
            }
        }

        match (found.as_slice(), missing) {
            ([], _) => Self::Missing,
            ([page], false) => Self::Single(*page),
            ([_], true) => Self::Partial,
            _ => Self::Inconsistent(found),
        }
    }
}

/// Resolves output paths of pages and links to documented symbols.
///
/// All indices are computed in [`LocationResolver::new`]; afterwards the
/// resolver is immutable and can be shared across threads.
pub struct LocationResolver {
    graph: Arc<PageGraph>,
    config: LocationConfig,
    paths: PathIndex,
    primary: DriIndex,
    anchors: DriIndex,
}

impl LocationResolver {
    /// Build all indices for `graph`.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::SegmentCollision` if two siblings escape to the
    /// same segment, `LocationError::DuplicatePrimary` if two pages represent
    /// one (DRI, source set), and `LocationError::ConflictingAnchor` if two
    /// pages anchor one (DRI, source set).
    pub fn new(graph: Arc<PageGraph>, config: LocationConfig) -> Result<Self, LocationError> {
        let paths = PathIndex::build(&graph, config.escaper.as_ref())?;
        let primary = index::build_primary(&graph)?;
        let anchors = index::build_anchors(&graph)?;

        tracing::debug!(
            page_count = graph.len(),
            primary_count = primary.len(),
            anchor_count = anchors.len(),
            "Location indices built"
        );

        Ok(Self {
            graph,
            config,
            paths,
            primary,
            anchors,
        })
    }

    #[must_use]
    pub fn graph(&self) -> &PageGraph {
        &self.graph
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        self.config.extension()
    }

    /// Absolute segment path of a page, empty for the root.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::UnknownPage` if the page is not in the graph.
    pub fn path_of(&self, page: PageId) -> Result<&[String], LocationError> {
        self.paths.get(page).ok_or(LocationError::UnknownPage(page))
    }

    /// Path of `page` relative to `context`, or from the root when `context` is `None`.
    ///
    /// A leaf context is treated as its parent, since a leaf page is written
    /// next to its siblings. Targets with child pages end in `index`, as does
    /// the root itself.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::UnknownPage` if either page is not in the graph.
    pub fn resolve_page(
        &self,
        page: PageId,
        context: Option<PageId>,
        skip_extension: bool,
    ) -> Result<String, LocationError> {
        let target = self.path_of(page)?;
        let frame: &[String] = match context {
            Some(context) => self.path_of(self.frame_of(context))?,
            None => &[],
        };

        let common = target
            .iter()
            .zip(frame)
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<&str> = iter::repeat_n("..", frame.len() - common)
            .chain(target[common..].iter().map(String::as_str))
            .collect();
        if !self.graph.is_leaf(page) || target.is_empty() {
            segments.push(PAGE_WITH_CHILDREN_SUFFIX);
        }

        let mut path = segments.join("/");
        if !skip_extension {
            path.push_str(&self.config.extension);
        }
        Ok(path)
    }

    /// Link to the symbol `dri` as seen from `context`.
    ///
    /// A page documenting `dri` in every requested source set wins, then a
    /// page anchoring it in every requested source set (with `#<dri>`
    /// appended). Otherwise the external resolver is asked. A DRI that maps
    /// to different pages for different source sets, and has no single
    /// anchoring page either, is reported before the external resolver is
    /// asked.
    #[must_use]
    pub fn resolve_dri(
        &self,
        dri: &Dri,
        source_sets: &BTreeSet<SourceSet>,
        context: Option<PageId>,
    ) -> Option<String> {
        match self.find_internal(dri, source_sets) {
            Ok(Some((page, anchor))) => {
                let path = self.resolve_page(page, context, false).ok()?;
                Some(if anchor { format!("{path}#{dri}") } else { path })
            }
            Ok(None) => self.config.external.resolve(dri, source_sets),
            Err(pages) => {
                tracing::warn!(
                    dri = %dri,
                    pages = ?pages,
                    "DRI maps to different pages across source sets, using external location"
                );
                self.config.external.resolve(dri, source_sets)
            }
        }
    }

    /// Page for `dri` and whether it is an anchor on that page.
    ///
    /// Inconsistent primary pages fall through to the anchors. `Err` carries
    /// the pages of a mapping that stayed inconsistent.
    fn find_internal(
        &self,
        dri: &Dri,
        source_sets: &BTreeSet<SourceSet>,
    ) -> Result<Option<(PageId, bool)>, Vec<PageId>> {
        let primary = match Lookup::find(&self.primary, dri, source_sets) {
            Lookup::Single(page) => return Ok(Some((page, false))),
            Lookup::Inconsistent(pages) => pages,
            Lookup::Missing | Lookup::Partial => Vec::new(),
        };

        match Lookup::find(&self.anchors, dri, source_sets) {
            Lookup::Single(page) => Ok(Some((page, true))),
            Lookup::Inconsistent(mut pages) => {
                pages.extend(primary);
                Err(pages)
            }
            Lookup::Missing | Lookup::Partial if primary.is_empty() => Ok(None),
            Lookup::Missing | Lookup::Partial => Err(primary),
        }
    }

    /// Path from `context` to the output root, without a page name.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::UnknownPage` if `context` is not in the graph.
    pub fn resolve_root(&self, context: PageId) -> Result<String, LocationError> {
        let path = self.resolve_page(self.graph.root(), Some(context), true)?;
        Ok(path
            .strip_suffix(PAGE_WITH_CHILDREN_SUFFIX)
            .unwrap_or(&path)
            .to_owned())
    }

    /// The page followed by each of its ancestors up to and including the root.
    ///
    /// # Errors
    ///
    /// Returns `LocationError::UnknownPage` if the page is not in the graph.
    pub fn ancestors(&self, page: PageId) -> Result<Vec<PageId>, LocationError> {
        if !self.graph.contains(page) {
            return Err(LocationError::UnknownPage(page));
        }
        Ok(iter::successors(Some(page), |&p| self.graph.parent(p)).collect())
    }

    fn frame_of(&self, context: PageId) -> PageId {
        if self.graph.is_leaf(context) {
            self.graph.parent(context).unwrap_or(context)
        } else {
            context
        }
    }
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("pages", &self.graph.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
