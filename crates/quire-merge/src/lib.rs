//! Source set merging for Quire.
//!
//! The front end produces one declaration tree per source set. Before any
//! page is built, this crate:
//! - applies module and package documentation from include files to each
//!   per-variant tree ([`Includes`], [`apply_includes`])
//! - folds the trees into one, unifying declarations with equal identities
//!   ([`merge_variants`])
//! - splits a merged declaration's documentation into blocks shared by all
//!   of its source sets and blocks specific to one ([`split_documentation`])

mod includes;
mod merge;

pub use includes::{Includes, apply_includes};
pub use merge::{MergeError, SplitDocumentation, merge_variants, split_documentation};
