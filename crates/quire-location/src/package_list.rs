//! Package list manifest.
//!
//! Lists the packages a run documents so that another run can link to them
//! through [`ExternalDocumentationLink`](crate::ExternalDocumentationLink):
//!
//! ```text
//! $quire.format:html-v1
//! $quire.linkExtension:html
//! module:core
//! a.b
//! a.c
//! ```

use std::collections::BTreeSet;
use std::fmt;

use quire_pages::{PageGraph, PageKind};

const FORMAT_PROPERTY: &str = "$quire.format";
const FORMAT_VERSION: &str = "html-v1";
const EXTENSION_PROPERTY: &str = "$quire.linkExtension";
const MODULE_PREFIX: &str = "module:";

/// Packages documented by one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageList {
    module: String,
    extension: String,
    packages: BTreeSet<String>,
}

impl PackageList {
    /// Collect the names of all package pages in `graph`.
    ///
    /// The root package has no name and is not listed.
    #[must_use]
    pub fn from_graph(graph: &PageGraph, module: &str, extension: &str) -> Self {
        let packages = graph
            .pages()
            .filter(|(_, page)| page.kind == PageKind::Package && !page.name.is_empty())
            .map(|(_, page)| page.name.clone())
            .collect();

        Self {
            module: module.to_owned(),
            extension: extension.to_owned(),
            packages,
        }
    }

    /// Parse a package list.
    ///
    /// Unknown `$` properties and blank lines are ignored. When several
    /// `module:` lines appear the last one wins.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.starts_with('$') {
                if let Some((key, value)) = line.split_once(':')
                    && key == EXTENSION_PROPERTY
                {
                    list.extension = if value.is_empty() {
                        String::new()
                    } else {
                        format!(".{value}")
                    };
                }
            } else if let Some(module) = line.strip_prefix(MODULE_PREFIX) {
                module.clone_into(&mut list.module);
            } else {
                list.packages.insert(line.to_owned());
            }
        }

        list
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Link extension including its leading dot, empty if none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }
}

impl fmt::Display for PackageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FORMAT_PROPERTY}:{FORMAT_VERSION}")?;
        writeln!(
            f,
            "{EXTENSION_PROPERTY}:{}",
            self.extension.trim_start_matches('.')
        )?;
        writeln!(f, "{MODULE_PREFIX}{}", self.module)?;
        for package in &self.packages {
            writeln!(f, "{package}")?;
        }
        Ok(())
    }
}
