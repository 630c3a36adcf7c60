//! Locations of symbols documented outside the current run.

use std::collections::BTreeSet;

use quire_model::{Dri, SourceSet};

use crate::escape::{PAGE_WITH_CHILDREN_SUFFIX, identifier_to_filename};
use crate::PackageList;

/// Fallback consulted for symbols the page graph does not document.
pub trait ExternalLocationResolver: Send + Sync {
    /// Location of `dri`, or `None` if this resolver does not know it.
    fn resolve(&self, dri: &Dri, source_sets: &BTreeSet<SourceSet>) -> Option<String>;
}

impl<F> ExternalLocationResolver for F
where
    F: Fn(&Dri, &BTreeSet<SourceSet>) -> Option<String> + Send + Sync,
{
    fn resolve(&self, dri: &Dri, source_sets: &BTreeSet<SourceSet>) -> Option<String> {
        self(dri, source_sets)
    }
}

/// Resolver that knows no external locations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExternalLocations;

impl ExternalLocationResolver for NoExternalLocations {
    fn resolve(&self, _dri: &Dri, _source_sets: &BTreeSet<SourceSet>) -> Option<String> {
        None
    }
}

/// Ordered chain of resolvers; the first one that knows a symbol wins.
#[derive(Default)]
pub struct ExternalLocations {
    resolvers: Vec<Box<dyn ExternalLocationResolver>>,
}

impl ExternalLocations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, resolver: impl ExternalLocationResolver + 'static) -> Self {
        self.push(resolver);
        self
    }

    pub fn push(&mut self, resolver: impl ExternalLocationResolver + 'static) {
        self.resolvers.push(Box::new(resolver));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl ExternalLocationResolver for ExternalLocations {
    fn resolve(&self, dri: &Dri, source_sets: &BTreeSet<SourceSet>) -> Option<String> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.resolve(dri, source_sets))
    }
}

/// Link to documentation published by another run.
///
/// Symbols in one of `packages` resolve under `url` with the same layout this
/// crate produces: the package verbatim, then one escaped segment per class
/// name, then the escaped callable name. Classlike and package targets end in
/// `index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalDocumentationLink {
    url: String,
    packages: BTreeSet<String>,
    extension: String,
}

impl ExternalDocumentationLink {
    /// Create a link; a trailing `/` is added to `url` if missing.
    #[must_use]
    pub fn new(
        url: &str,
        packages: impl IntoIterator<Item = String>,
        extension: impl Into<String>,
    ) -> Self {
        let mut url = url.to_owned();
        if !url.ends_with('/') {
            url.push('/');
        }
        Self {
            url,
            packages: packages.into_iter().collect(),
            extension: extension.into(),
        }
    }

    /// Create a link for the packages and extension of a package list.
    #[must_use]
    pub fn from_package_list(url: &str, list: &PackageList) -> Self {
        Self::new(url, list.packages().iter().cloned(), list.extension())
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }
}

impl ExternalLocationResolver for ExternalDocumentationLink {
    fn resolve(&self, dri: &Dri, _source_sets: &BTreeSet<SourceSet>) -> Option<String> {
        let package = dri.package()?;
        if !self.packages.contains(package) {
            return None;
        }

        let mut segments: Vec<String> = Vec::new();
        if !package.is_empty() {
            segments.push(package.to_owned());
        }
        if let Some(class_names) = dri.class_names() {
            segments.extend(class_names.split('.').map(identifier_to_filename));
        }
        match dri.callable() {
            Some(callable) => {
                let name = callable.split_once('(').map_or(callable, |(name, _)| name);
                segments.push(identifier_to_filename(name));
            }
            None => segments.push(PAGE_WITH_CHILDREN_SUFFIX.to_owned()),
        }

        Some(format!("{}{}{}", self.url, segments.join("/"), self.extension))
    }
}
