//! Declaration tree supplied by the front end.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Documentation, Dri, SourceSet};

/// Kind of a documented declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeclarationKind {
    Module,
    Package,
    Classlike,
    Function,
    Property,
    Constructor,
    EnumEntry,
    TypeAlias,
}

impl DeclarationKind {
    /// Whether declarations of this kind get their own page.
    ///
    /// Everything else is documented as an anchored member of its owner's page.
    #[must_use]
    pub fn is_page(self) -> bool {
        matches!(self, Self::Module | Self::Package | Self::Classlike)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Package => "package",
            Self::Classlike => "classlike",
            Self::Function => "function",
            Self::Property => "property",
            Self::Constructor => "constructor",
            Self::EnumEntry => "enum_entry",
            Self::TypeAlias => "type_alias",
        }
    }
}

/// A declaration node.
///
/// Per-variant trees from the front end carry a single source set on every
/// node; merged trees carry the union of the source sets each node appears in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub dri: Dri,
    pub name: String,
    pub kind: DeclarationKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_sets: BTreeSet<SourceSet>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub documentation: BTreeMap<SourceSet, Documentation>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Declaration>,
}

impl Declaration {
    #[must_use]
    pub fn new(dri: Dri, name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            dri,
            name: name.into(),
            kind,
            source_sets: BTreeSet::new(),
            documentation: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add a child declaration.
    #[must_use]
    pub fn with_child(mut self, child: Declaration) -> Self {
        self.children.push(child);
        self
    }

    /// Attach documentation for a source set and mark the declaration present in it.
    #[must_use]
    pub fn with_documentation(mut self, source_set: &SourceSet, doc: Documentation) -> Self {
        self.source_sets.insert(source_set.clone());
        self.documentation.insert(source_set.clone(), doc);
        self
    }

    /// Whether any child gets its own page.
    #[must_use]
    pub fn has_addressable_children(&self) -> bool {
        self.children.iter().any(|c| c.kind.is_page())
    }

    /// Tag this subtree as produced for `source_set`.
    ///
    /// Nodes that already name a source set keep theirs.
    pub fn assign_source_set(&mut self, source_set: &SourceSet) {
        if self.source_sets.is_empty() {
            self.source_sets.insert(source_set.clone());
        }
        for child in &mut self.children {
            child.assign_source_set(source_set);
        }
    }

    /// Visit this declaration and all descendants in pre-order.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Declaration)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocBlock;

    fn class(name: &str) -> Declaration {
        Declaration::new(Dri::for_classlike("p", name), name, DeclarationKind::Classlike)
    }

    fn function(owner: &str, name: &str) -> Declaration {
        Declaration::new(
            Dri::for_classlike("p", owner).with_callable(&format!("{name}()")),
            name,
            DeclarationKind::Function,
        )
    }

    #[test]
    fn test_is_page_kinds() {
        assert!(DeclarationKind::Module.is_page());
        assert!(DeclarationKind::Package.is_page());
        assert!(DeclarationKind::Classlike.is_page());
        assert!(!DeclarationKind::Function.is_page());
        assert!(!DeclarationKind::EnumEntry.is_page());
    }

    #[test]
    fn test_has_addressable_children_members_only() {
        let decl = class("Foo").with_child(function("Foo", "bar"));

        assert!(!decl.has_addressable_children());
    }

    #[test]
    fn test_has_addressable_children_nested_class() {
        let decl = class("Foo").with_child(class("Foo.Inner"));

        assert!(decl.has_addressable_children());
    }

    #[test]
    fn test_assign_source_set_tags_whole_tree() {
        let jvm = SourceSet::new("jvm");
        let mut decl = class("Foo").with_child(function("Foo", "bar"));

        decl.assign_source_set(&jvm);

        assert!(decl.source_sets.contains(&jvm));
        assert!(decl.children[0].source_sets.contains(&jvm));
    }

    #[test]
    fn test_assign_source_set_keeps_existing() {
        let jvm = SourceSet::new("jvm");
        let js = SourceSet::new("js");
        let mut decl = class("Foo").with_documentation(&js, Documentation::default());

        decl.assign_source_set(&jvm);

        assert_eq!(decl.source_sets, BTreeSet::from([js]));
    }

    #[test]
    fn test_with_documentation_adds_source_set() {
        let jvm = SourceSet::new("jvm");

        let decl = class("Foo").with_documentation(
            &jvm,
            Documentation::new(vec![DocBlock::description("A foo.")]),
        );

        assert!(decl.source_sets.contains(&jvm));
        assert_eq!(decl.documentation[&jvm].blocks.len(), 1);
    }
}
