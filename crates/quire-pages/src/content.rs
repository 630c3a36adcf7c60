//! Rendered content tree of a page.

use std::collections::BTreeSet;

use quire_model::{DocBlock, Dri, SourceSet};

/// Kind of a content node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentKind {
    /// Container without presentation of its own.
    Group,
    /// Heading of the given level; the heading text is in the children.
    Header(u8),
    Text(String),
    /// A named symbol, usually linked through its DRI.
    Symbol(String),
    /// A documentation block.
    Doc(DocBlock),
}

/// A node of page content.
///
/// Nodes flagged with `anchor` mark the in-page location where the symbol
/// identified by `dri` is documented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentNode {
    pub kind: ContentKind,
    pub dri: Option<Dri>,
    pub source_sets: BTreeSet<SourceSet>,
    pub anchor: bool,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    #[must_use]
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            dri: None,
            source_sets: BTreeSet::new(),
            anchor: false,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(children: Vec<ContentNode>) -> Self {
        Self {
            children,
            ..Self::new(ContentKind::Group)
        }
    }

    #[must_use]
    pub fn header(level: u8, text: &str) -> Self {
        Self {
            children: vec![Self::new(ContentKind::Text(text.to_owned()))],
            ..Self::new(ContentKind::Header(level))
        }
    }

    /// A symbol reference to `dri`, rendered as a link.
    #[must_use]
    pub fn symbol(name: &str, dri: Dri) -> Self {
        Self {
            dri: Some(dri),
            ..Self::new(ContentKind::Symbol(name.to_owned()))
        }
    }

    /// Mark this node as the documented location of its symbol.
    #[must_use]
    pub fn anchored(mut self) -> Self {
        self.anchor = true;
        self
    }

    #[must_use]
    pub fn with_source_sets(mut self, source_sets: impl IntoIterator<Item = SourceSet>) -> Self {
        self.source_sets.extend(source_sets);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// This node and all nodes below it, in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over a content subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a ContentNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
