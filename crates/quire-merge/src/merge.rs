//! Folding per-variant declaration trees into one.

use std::collections::HashMap;

use quire_model::{Declaration, DocBlock, Dri, SourceSet, SourceSetOrder};

/// Error returned when per-variant trees cannot be merged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// A declaration names a source set missing from the declared order.
    #[error("Declaration {dri} belongs to undeclared source set '{source_set}'")]
    UnknownSourceSet {
        /// Identity of the offending declaration.
        dri: Dri,
        /// The undeclared source set.
        source_set: SourceSet,
    },
    /// A declaration is not tagged with any source set.
    #[error("Declaration {0} has no source set")]
    MissingSourceSet(Dri),
}

/// Merge per-variant trees into one forest.
///
/// Declarations with equal [`Dri`]s are unified at every level: source sets
/// are unioned, documentation for the same source set is concatenated with
/// exact duplicates removed, and children are merged recursively. A member
/// missing from some variant is simply not tagged with that variant.
///
/// Trees are processed in the declared source set order (ties broken by
/// identity), so the result does not depend on the order in which source
/// sets are listed in `trees`. Several trees with the same first source set
/// and the same identity fold in input order.
pub fn merge_variants(
    trees: Vec<Declaration>,
    order: &SourceSetOrder,
) -> Result<Vec<Declaration>, MergeError> {
    let mut ranked = Vec::with_capacity(trees.len());
    for tree in trees {
        check_source_sets(&tree, order)?;
        let rank = order
            .first_rank(&tree.source_sets)
            .ok_or_else(|| MergeError::MissingSourceSet(tree.dri.clone()))?;
        ranked.push((rank, tree));
    }
    ranked.sort_by(|(a_rank, a), (b_rank, b)| a_rank.cmp(b_rank).then_with(|| a.dri.cmp(&b.dri)));

    Ok(merge_siblings(ranked.into_iter().map(|(_, tree)| tree)))
}

/// Every node must name at least one source set, all of them declared.
fn check_source_sets(decl: &Declaration, order: &SourceSetOrder) -> Result<(), MergeError> {
    if decl.source_sets.is_empty() {
        return Err(MergeError::MissingSourceSet(decl.dri.clone()));
    }
    if let Some(unknown) = decl.source_sets.iter().find(|s| order.rank(s).is_none()) {
        return Err(MergeError::UnknownSourceSet {
            dri: decl.dri.clone(),
            source_set: unknown.clone(),
        });
    }
    decl.children
        .iter()
        .try_for_each(|child| check_source_sets(child, order))
}

/// Unify declarations sharing a DRI, keeping first-appearance order.
fn merge_siblings(decls: impl Iterator<Item = Declaration>) -> Vec<Declaration> {
    let mut merged: Vec<Declaration> = Vec::new();
    let mut positions: HashMap<Dri, usize> = HashMap::new();

    for decl in decls {
        if let Some(&idx) = positions.get(&decl.dri) {
            absorb(&mut merged[idx], decl);
        } else {
            positions.insert(decl.dri.clone(), merged.len());
            merged.push(decl);
        }
    }

    for decl in &mut merged {
        let children = std::mem::take(&mut decl.children);
        decl.children = merge_siblings(children.into_iter());
    }

    merged
}

/// Fold `other` into `target`. Children are concatenated and merged later.
fn absorb(target: &mut Declaration, other: Declaration) {
    if target.name != other.name || target.kind != other.kind {
        tracing::warn!(
            dri = %target.dri,
            kept_name = %target.name,
            kept_kind = target.kind.as_str(),
            dropped_name = %other.name,
            dropped_kind = other.kind.as_str(),
            "Source sets disagree on declaration shape, keeping the earliest"
        );
    }

    target.source_sets.extend(other.source_sets);
    for (source_set, doc) in other.documentation {
        target
            .documentation
            .entry(source_set)
            .or_default()
            .extend_distinct(doc.blocks);
    }
    target.children.extend(other.children);
}

/// Documentation of a merged declaration with redundancy removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitDocumentation {
    /// Blocks present, textually identical, under every source set of the declaration.
    pub shared: Vec<DocBlock>,
    /// Remaining blocks per source set, in declared order. Source sets with
    /// nothing left are omitted.
    pub by_source_set: Vec<(SourceSet, Vec<DocBlock>)>,
}

impl SplitDocumentation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.by_source_set.is_empty()
    }
}

/// Split a declaration's documentation into shared and variant-specific blocks.
///
/// Blocks of every source set are concatenated in declared order. A block
/// found in the documentation of *all* source sets the declaration spans is
/// emitted once, in [`SplitDocumentation::shared`]; all other blocks stay with
/// their source set.
#[must_use]
pub fn split_documentation(decl: &Declaration, order: &SourceSetOrder) -> SplitDocumentation {
    let source_sets = order.sorted(&decl.source_sets);

    let mut shared: Vec<DocBlock> = Vec::new();
    for block in source_sets.iter().flat_map(|s| blocks_of(decl, s)) {
        let everywhere = source_sets
            .iter()
            .all(|s| blocks_of(decl, s).contains(block));
        if everywhere && !shared.contains(block) {
            shared.push(block.clone());
        }
    }

    let by_source_set = source_sets
        .into_iter()
        .filter_map(|source_set| {
            let specific: Vec<DocBlock> = blocks_of(decl, source_set)
                .iter()
                .filter(|block| !shared.contains(block))
                .cloned()
                .collect();
            (!specific.is_empty()).then(|| (source_set.clone(), specific))
        })
        .collect();

    SplitDocumentation {
        shared,
        by_source_set,
    }
}

fn blocks_of<'a>(decl: &'a Declaration, source_set: &SourceSet) -> &'a [DocBlock] {
    decl.documentation
        .get(source_set)
        .map_or(&[][..], |doc| doc.blocks.as_slice())
}
