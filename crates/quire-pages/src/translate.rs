//! Translation of merged declarations into pages.

use std::collections::BTreeSet;

use quire_merge::split_documentation;
use quire_model::{Declaration, DeclarationKind, SourceSet, SourceSetOrder};

use crate::{ContentKind, ContentNode, GraphError, Page, PageGraph, PageGraphBuilder, PageId, PageKind};

/// Build the page graph from a merged declaration forest in one traversal.
///
/// A single module becomes the root page; several modules are placed under a
/// synthetic root with an empty name. Modules, packages and classlikes get
/// pages. All other declarations are flattened into their owner's content as
/// anchored symbol nodes. Page-kind declarations nested inside members become
/// child pages of the page owning those members.
///
/// # Errors
///
/// Returns `GraphError::MissingRoot` if `modules` is empty.
pub fn translate(modules: &[Declaration], order: &SourceSetOrder) -> Result<PageGraph, GraphError> {
    let mut builder = PageGraphBuilder::new();

    if let [module] = modules {
        add_declaration(&mut builder, module, None, order)?;
    } else if !modules.is_empty() {
        let root = builder.add_page(aggregate_root(modules), None)?;
        for module in modules {
            add_declaration(&mut builder, module, Some(root), order)?;
        }
    }

    builder.build()
}

fn aggregate_root(modules: &[Declaration]) -> Page {
    let source_sets: BTreeSet<SourceSet> = modules
        .iter()
        .flat_map(|m| m.source_sets.iter().cloned())
        .collect();
    let listing = modules
        .iter()
        .map(|m| {
            ContentNode::symbol(&m.name, m.dri.clone()).with_source_sets(m.source_sets.iter().cloned())
        })
        .collect();

    Page::new("", PageKind::Root, ContentNode::group(listing)).with_source_sets(source_sets)
}

fn add_declaration(
    builder: &mut PageGraphBuilder,
    decl: &Declaration,
    parent: Option<PageId>,
    order: &SourceSetOrder,
) -> Result<(), GraphError> {
    let kind = match decl.kind {
        DeclarationKind::Module => PageKind::Module,
        DeclarationKind::Package => PageKind::Package,
        _ => PageKind::Classlike,
    };
    let page = Page::new(decl.name.clone(), kind, page_content(decl, order))
        .with_dri(decl.dri.clone())
        .with_source_sets(decl.source_sets.iter().cloned());

    let id = builder.add_page(page, parent)?;
    for child in decl.children.iter().filter(|c| c.kind.is_page()) {
        add_declaration(builder, child, Some(id), order)?;
    }
    for nested in nested_in_members(decl) {
        tracing::debug!(
            owner = %decl.dri,
            dri = %nested.dri,
            "Declaration nested in a member placed under the owning page"
        );
        add_declaration(builder, nested, Some(id), order)?;
    }

    Ok(())
}

/// Page-kind declarations found below the members of `decl`.
fn nested_in_members(decl: &Declaration) -> Vec<&Declaration> {
    let mut found = Vec::new();
    let mut pending: Vec<&Declaration> =
        decl.children.iter().filter(|c| !c.kind.is_page()).collect();

    while let Some(member) = pending.pop() {
        for child in member.children.iter().rev() {
            if child.kind.is_page() {
                found.push(child);
            } else {
                pending.push(child);
            }
        }
    }
    found
}

/// Header, documentation, nested page listing and members of a page.
fn page_content(decl: &Declaration, order: &SourceSetOrder) -> ContentNode {
    let mut sections = vec![ContentNode::header(1, &decl.name)];
    sections.extend(documentation_nodes(decl, order));

    if decl.has_addressable_children() {
        let mut listing = vec![ContentNode::header(2, "Types")];
        listing.extend(
            decl.children
                .iter()
                .filter(|c| c.kind.is_page())
                .map(|c| {
                    ContentNode::symbol(&c.name, c.dri.clone())
                        .with_source_sets(c.source_sets.iter().cloned())
                }),
        );
        sections.push(ContentNode::group(listing));
    }

    let members: Vec<ContentNode> = decl
        .children
        .iter()
        .filter(|c| !c.kind.is_page())
        .map(|c| member_node(c, order))
        .collect();
    if !members.is_empty() {
        let mut group = vec![ContentNode::header(2, "Members")];
        group.extend(members);
        sections.push(ContentNode::group(group));
    }

    ContentNode::group(sections).with_source_sets(decl.source_sets.iter().cloned())
}

/// Anchored location of a member, with its documentation and nested members.
fn member_node(decl: &Declaration, order: &SourceSetOrder) -> ContentNode {
    let mut children = documentation_nodes(decl, order);
    children.extend(
        decl.children
            .iter()
            .filter(|c| !c.kind.is_page())
            .map(|c| member_node(c, order)),
    );

    ContentNode::symbol(&decl.name, decl.dri.clone())
        .anchored()
        .with_source_sets(decl.source_sets.iter().cloned())
        .with_children(children)
}

/// Shared documentation first, then one group per source set with what is specific to it.
fn documentation_nodes(decl: &Declaration, order: &SourceSetOrder) -> Vec<ContentNode> {
    let split = split_documentation(decl, order);
    let doc_group = |blocks: Vec<_>, source_sets: BTreeSet<SourceSet>| {
        ContentNode::group(
            blocks
                .into_iter()
                .map(|block| ContentNode::new(ContentKind::Doc(block)))
                .collect(),
        )
        .with_source_sets(source_sets)
    };

    let mut nodes = Vec::new();
    if !split.shared.is_empty() {
        nodes.push(doc_group(split.shared, decl.source_sets.clone()));
    }
    for (source_set, blocks) in split.by_source_set {
        nodes.push(doc_group(blocks, BTreeSet::from([source_set])));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_model::{DocBlock, Documentation, Dri};

    use super::*;

    fn jvm() -> SourceSet {
        SourceSet::new("jvm")
    }

    fn order() -> SourceSetOrder {
        SourceSetOrder::new([jvm()])
    }

    fn module(name: &str, children: Vec<Declaration>) -> Declaration {
        let mut decl = Declaration::new(Dri::for_module(name), name, DeclarationKind::Module);
        decl.children = children;
        decl.assign_source_set(&jvm());
        decl
    }

    fn package(children: Vec<Declaration>) -> Declaration {
        let mut decl = Declaration::new(Dri::for_package("a.b"), "a.b", DeclarationKind::Package);
        decl.children = children;
        decl
    }

    fn class(name: &str, children: Vec<Declaration>) -> Declaration {
        let mut decl =
            Declaration::new(Dri::for_classlike("a.b", name), name, DeclarationKind::Classlike);
        decl.children = children;
        decl
    }

    fn function(owner: &str, name: &str) -> Declaration {
        Declaration::new(
            Dri::for_classlike("a.b", owner).with_callable(&format!("{name}()")),
            name,
            DeclarationKind::Function,
        )
    }

    #[test]
    fn test_single_module_is_root() {
        let modules = vec![module("core", vec![package(vec![class("Foo", vec![])])])];

        let graph = translate(&modules, &order()).unwrap();

        let root = graph.page(graph.root()).unwrap();
        assert_eq!(root.kind, PageKind::Module);
        assert_eq!(root.name, "core");
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_several_modules_get_synthetic_root() {
        let modules = vec![module("core", vec![]), module("io", vec![])];

        let graph = translate(&modules, &order()).unwrap();

        let root = graph.page(graph.root()).unwrap();
        assert_eq!(root.kind, PageKind::Root);
        assert_eq!(root.name, "");
        assert!(root.dris.is_empty());
        assert_eq!(graph.children(graph.root()).len(), 2);
    }

    #[test]
    fn test_no_modules_is_error() {
        let result = translate(&[], &order());

        assert_eq!(result.unwrap_err(), GraphError::MissingRoot);
    }

    #[test]
    fn test_members_become_anchors_not_pages() {
        let modules = vec![module(
            "core",
            vec![package(vec![class("Foo", vec![function("Foo", "bar")])])],
        )];

        let graph = translate(&modules, &order()).unwrap();

        assert_eq!(graph.len(), 3);
        let foo_id = graph.children(graph.children(graph.root())[0])[0];
        let foo = graph.page(foo_id).unwrap();
        let anchors: Vec<_> = foo
            .content
            .descendants()
            .filter(|n| n.anchor)
            .filter_map(|n| n.dri.clone())
            .collect();
        assert_eq!(anchors, vec![Dri::for_classlike("a.b", "Foo").with_callable("bar()")]);
    }

    #[test]
    fn test_nested_classlike_gets_child_page() {
        let modules = vec![module(
            "core",
            vec![package(vec![class("Outer", vec![class("Outer.Inner", vec![])])])],
        )];

        let graph = translate(&modules, &order()).unwrap();

        let package_id = graph.children(graph.root())[0];
        let outer_id = graph.children(package_id)[0];
        let inner_id = graph.children(outer_id)[0];
        assert_eq!(graph.page(inner_id).unwrap().name, "Outer.Inner");
        assert_eq!(graph.parent(inner_id), Some(outer_id));
    }

    #[test]
    fn test_classlike_nested_in_member_gets_page_under_owner() {
        let mut bar = function("Foo", "bar");
        bar.children = vec![class("Local", vec![])];
        let modules = vec![module("core", vec![package(vec![class("Foo", vec![bar])])])];

        let graph = translate(&modules, &order()).unwrap();

        assert_eq!(graph.len(), 4);
        let foo_id = graph.children(graph.children(graph.root())[0])[0];
        let local_id = graph.children(foo_id)[0];
        let local = graph.page(local_id).unwrap();
        assert_eq!(local.name, "Local");
        assert_eq!(local.kind, PageKind::Classlike);
        assert!(local.dris.contains(&Dri::for_classlike("a.b", "Local")));
        let foo = graph.page(foo_id).unwrap();
        let local_dri = Some(Dri::for_classlike("a.b", "Local"));
        assert!(foo.content.descendants().all(|n| n.dri != local_dri));
    }

    #[test]
    fn test_page_carries_dri_and_source_sets() {
        let modules = vec![module("core", vec![package(vec![])])];

        let graph = translate(&modules, &order()).unwrap();

        let package = graph.page(graph.children(graph.root())[0]).unwrap();
        assert_eq!(package.kind, PageKind::Package);
        assert!(package.dris.contains(&Dri::for_package("a.b")));
        assert!(package.source_sets.contains(&jvm()));
    }

    #[test]
    fn test_package_lists_its_types() {
        let modules = vec![module("core", vec![package(vec![class("Foo", vec![])])])];

        let graph = translate(&modules, &order()).unwrap();

        let package = graph.page(graph.children(graph.root())[0]).unwrap();
        let listed: Vec<_> = package
            .content
            .descendants()
            .filter(|n| matches!(n.kind, ContentKind::Symbol(_)))
            .collect();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].anchor);
        assert_eq!(listed[0].dri, Some(Dri::for_classlike("a.b", "Foo")));
    }

    #[test]
    fn test_documentation_rendered_as_doc_nodes() {
        let mut core = module("core", vec![]);
        core.documentation.insert(
            jvm(),
            Documentation::new(vec![DocBlock::description("Core runtime.")]),
        );

        let graph = translate(&[core], &order()).unwrap();

        let root = graph.page(graph.root()).unwrap();
        let docs: Vec<_> = root
            .content
            .descendants()
            .filter_map(|n| match &n.kind {
                ContentKind::Doc(block) => Some(block.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(docs, vec!["Core runtime."]);
    }
}
