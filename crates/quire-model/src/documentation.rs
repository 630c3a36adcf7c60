//! Documentation blocks attached to declarations.

/// Kind of a documentation block.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DocTag {
    /// Free-form description text.
    Description,
    /// Parameter description, keyed by parameter name.
    Param(String),
    /// Return value description.
    Return,
    /// Thrown exception description, keyed by exception type.
    Throws(String),
    /// Reference to a related declaration.
    See(String),
    /// Reference to a sample.
    Sample(String),
    /// Version the declaration appeared in.
    Since,
    /// Any other named tag.
    Custom(String),
}

/// A single documentation block.
///
/// Blocks compare textually: two blocks are equal iff tag and text are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocBlock {
    pub tag: DocTag,
    pub text: String,
}

impl DocBlock {
    #[must_use]
    pub fn new(tag: DocTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn description(text: impl Into<String>) -> Self {
        Self::new(DocTag::Description, text)
    }
}

/// Ordered documentation of one declaration under one source set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Documentation {
    pub blocks: Vec<DocBlock>,
}

impl Documentation {
    #[must_use]
    pub fn new(blocks: Vec<DocBlock>) -> Self {
        Self { blocks }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append blocks, skipping those already present.
    pub fn extend_distinct(&mut self, blocks: impl IntoIterator<Item = DocBlock>) {
        for block in blocks {
            if !self.blocks.contains(&block) {
                self.blocks.push(block);
            }
        }
    }
}

impl FromIterator<DocBlock> for Documentation {
    fn from_iter<I: IntoIterator<Item = DocBlock>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
