//! Module and package documentation from include files.
//!
//! An include file is Markdown split into sections by level-1 headings of the
//! form `# Module <name>` or `# Package <name>`:
//!
//! ```markdown
//! # Module core
//!
//! Core runtime.
//!
//! # Package a.b
//!
//! Utilities shared by all platforms.
//! ```
//!
//! Each section body is split into top-level Markdown blocks which become
//! description blocks of the named module or package.

use std::collections::HashMap;
use std::path::PathBuf;

use pulldown_cmark::{Event, Parser};
use quire_model::{Declaration, DeclarationKind, DocBlock, Documentation, SourceSet};

const MODULE_HEADING: &str = "# Module ";
const PACKAGE_HEADING: &str = "# Package ";

/// Documentation parsed from include files, keyed by module and package name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Includes {
    modules: HashMap<String, Documentation>,
    packages: HashMap<String, Documentation>,
}

#[derive(Clone, Copy)]
enum SectionKind {
    Module,
    Package,
}

impl Includes {
    /// Read and parse include files.
    ///
    /// Missing or unreadable files are reported with a warning and skipped.
    #[must_use]
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut includes = Self::default();
        for path in paths {
            match std::fs::read_to_string(path) {
                Ok(text) => includes.parse(&text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "Include file not found");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read include file");
                }
            }
        }
        includes
    }

    /// Parse one include file and add its sections.
    ///
    /// Text before the first section heading is ignored. Sections naming the
    /// same module or package accumulate, without duplicate blocks.
    pub fn parse(&mut self, text: &str) {
        let mut current: Option<(SectionKind, String)> = None;
        let mut body = String::new();

        for line in text.lines() {
            let heading = if let Some(name) = line.strip_prefix(MODULE_HEADING) {
                Some((SectionKind::Module, name))
            } else {
                line.strip_prefix(PACKAGE_HEADING)
                    .map(|name| (SectionKind::Package, name))
            };

            if let Some((kind, name)) = heading {
                if let Some((prev_kind, prev_name)) = current.take() {
                    self.add_section(prev_kind, prev_name, &body);
                }
                current = Some((kind, name.trim().to_owned()));
                body.clear();
            } else if current.is_some() {
                body.push_str(line);
                body.push('\n');
            }
        }

        if let Some((kind, name)) = current {
            self.add_section(kind, name, &body);
        }
    }

    fn add_section(&mut self, kind: SectionKind, name: String, body: &str) {
        let target = match kind {
            SectionKind::Module => &mut self.modules,
            SectionKind::Package => &mut self.packages,
        };
        target
            .entry(name)
            .or_default()
            .extend_distinct(markdown_blocks(body));
    }

    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Documentation> {
        self.modules.get(name)
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Documentation> {
        self.packages.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.packages.is_empty()
    }
}

/// Split Markdown into top-level blocks, preserving their source text.
fn markdown_blocks(markdown: &str) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(_) => {
                if depth == 0 {
                    start = range.start;
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    push_block(&mut blocks, &markdown[start..range.end]);
                }
            }
            _ if depth == 0 => push_block(&mut blocks, &markdown[range]),
            _ => {}
        }
    }

    blocks
}

fn push_block(blocks: &mut Vec<DocBlock>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        blocks.push(DocBlock::description(text));
    }
}

/// Attach include documentation to a per-variant tree.
///
/// Modules match by module name and packages by package name. Blocks are
/// appended to the documentation of `source_set`, only on declarations
/// present in that source set.
pub fn apply_includes(tree: &mut Declaration, source_set: &SourceSet, includes: &Includes) {
    if includes.is_empty() {
        return;
    }

    tree.walk_mut(&mut |decl| {
        if !decl.source_sets.contains(source_set) {
            return;
        }
        let extra = match decl.kind {
            DeclarationKind::Module => includes.module(&decl.name),
            DeclarationKind::Package => includes.package(&decl.name),
            _ => None,
        };
        if let Some(extra) = extra {
            decl.documentation
                .entry(source_set.clone())
                .or_default()
                .extend_distinct(extra.blocks.iter().cloned());
        }
    });
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use quire_model::Dri;

    use super::*;

    const INCLUDE: &str = "\
Preamble that belongs to no section.

# Module core

Core runtime.

Second paragraph.

# Package a.b

Utilities.

```kotlin
val x = 1
```
";

    #[test]
    fn test_parse_splits_sections() {
        let mut includes = Includes::default();

        includes.parse(INCLUDE);

        let module = includes.module("core").unwrap();
        assert_eq!(
            module.blocks,
            vec![
                DocBlock::description("Core runtime."),
                DocBlock::description("Second paragraph."),
            ]
        );
        let package = includes.package("a.b").unwrap();
        assert_eq!(package.blocks.len(), 2);
        assert_eq!(package.blocks[1].text, "```kotlin\nval x = 1\n```");
    }

    #[test]
    fn test_parse_ignores_preamble() {
        let mut includes = Includes::default();

        includes.parse("Just text.\n");

        assert!(includes.is_empty());
    }

    #[test]
    fn test_parse_repeated_section_accumulates_distinct() {
        let mut includes = Includes::default();

        includes.parse("# Package p\n\nOne.\n");
        includes.parse("# Package p\n\nOne.\n\nTwo.\n");

        let blocks = &includes.package("p").unwrap().blocks;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text, "Two.");
    }

    #[test]
    fn test_load_skips_missing_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let present = temp_dir.path().join("Module.md");
        fs::write(&present, "# Module core\n\nFrom file.\n").unwrap();
        let missing = temp_dir.path().join("missing.md");

        let includes = Includes::load(&[missing, present]);

        assert_eq!(
            includes.module("core").unwrap().blocks,
            vec![DocBlock::description("From file.")]
        );
    }

    #[test]
    fn test_apply_includes_attaches_module_and_package_docs() {
        let jvm = SourceSet::new("jvm");
        let mut tree = Declaration::new(Dri::for_module("core"), "core", DeclarationKind::Module)
            .with_child(Declaration::new(
                Dri::for_package("a.b"),
                "a.b",
                DeclarationKind::Package,
            ));
        tree.assign_source_set(&jvm);
        let mut includes = Includes::default();
        includes.parse(INCLUDE);

        apply_includes(&mut tree, &jvm, &includes);

        assert_eq!(tree.documentation[&jvm].blocks.len(), 2);
        assert_eq!(tree.children[0].documentation[&jvm].blocks[0].text, "Utilities.");
    }

    #[test]
    fn test_apply_includes_skips_other_source_sets() {
        let jvm = SourceSet::new("jvm");
        let js = SourceSet::new("js");
        let mut tree = Declaration::new(Dri::for_module("core"), "core", DeclarationKind::Module);
        tree.assign_source_set(&js);
        let mut includes = Includes::default();
        includes.parse(INCLUDE);

        apply_includes(&mut tree, &jvm, &includes);

        assert!(tree.documentation.is_empty());
    }
}
