//! Declaration model and reference identities for Quire.
//!
//! This crate provides the input side of the documentation pipeline:
//! - [`Dri`]: Structural identity of a documented declaration
//! - [`SourceSet`] / [`SourceSetOrder`]: Platform variants and their declared order
//! - [`Declaration`]: Front-end declaration tree node
//! - [`Documentation`]: Ordered documentation blocks
//!
//! The types are plain data. Enable the `serde` feature to read declaration
//! trees produced by an external front end.
//!
//! # Example
//!
//! ```
//! use quire_model::{Declaration, DeclarationKind, Dri, SourceSet};
//!
//! let jvm = SourceSet::new("jvm");
//! let mut class = Declaration::new(
//!     Dri::for_classlike("a.b", "Foo"),
//!     "Foo",
//!     DeclarationKind::Classlike,
//! );
//! class.assign_source_set(&jvm);
//!
//! assert_eq!(class.dri.to_string(), "a.b/Foo//");
//! assert!(class.source_sets.contains(&jvm));
//! ```

mod declaration;
mod documentation;
mod dri;
mod source_set;

pub use declaration::{Declaration, DeclarationKind};
pub use documentation::{DocBlock, DocTag, Documentation};
pub use dri::{Dri, DriParseError};
pub use source_set::{SourceSet, SourceSetOrder};
