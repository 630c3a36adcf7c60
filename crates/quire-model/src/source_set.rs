//! Source sets (platform variants) and their declared order.

use std::collections::BTreeSet;
use std::fmt;

/// One platform or target variant a declaration may be present in.
///
/// Source sets order by name so that sets of them iterate deterministically.
/// The order used for merging is declared separately with [`SourceSetOrder`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SourceSet(String);

impl SourceSet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Externally declared ordering of source sets.
///
/// Merging and documentation concatenation follow this order, never the
/// enumeration order of the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSetOrder {
    order: Vec<SourceSet>,
}

impl SourceSetOrder {
    /// Create an order from a sequence. Repeated entries keep their first position.
    pub fn new(source_sets: impl IntoIterator<Item = SourceSet>) -> Self {
        let mut order: Vec<SourceSet> = Vec::new();
        for source_set in source_sets {
            if !order.contains(&source_set) {
                order.push(source_set);
            }
        }
        Self { order }
    }

    /// Position of a source set in the declared order.
    #[must_use]
    pub fn rank(&self, source_set: &SourceSet) -> Option<usize> {
        self.order.iter().position(|s| s == source_set)
    }

    /// Lowest rank among the given source sets, `None` if any is undeclared or the set is empty.
    #[must_use]
    pub fn first_rank(&self, source_sets: &BTreeSet<SourceSet>) -> Option<usize> {
        source_sets
            .iter()
            .map(|s| self.rank(s))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .min()
    }

    /// Members of `source_sets` in declared order. Undeclared members follow, by name.
    #[must_use]
    pub fn sorted<'a>(&self, source_sets: &'a BTreeSet<SourceSet>) -> Vec<&'a SourceSet> {
        let mut sorted: Vec<&SourceSet> = source_sets.iter().collect();
        sorted.sort_by_key(|s| self.rank(s).unwrap_or(usize::MAX));
        sorted
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceSet> {
        self.order.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<SourceSet> for SourceSetOrder {
    fn from_iter<I: IntoIterator<Item = SourceSet>>(iter: I) -> Self {
        Self::new(iter)
    }
}
