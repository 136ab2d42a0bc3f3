//! Syntax tree model and traversal.
//!
//! The parser ([`tree-sitter`] with the TypeScript grammar) is an external
//! collaborator; this module lowers its output into an arena of immutable
//! nodes addressed by index ([`SyntaxTree`]), with parent back-references for
//! upward traversal and a closed [`SyntaxKind`] tag for pattern dispatch.
//!
//! All analysis passes consume this model read-only through the walker
//! primitives in [`walk`].

pub mod arena;
pub mod convert;
pub mod kind;
pub mod walk;

pub use arena::{Node, NodeId, SyntaxTree, TreeBuilder};
pub use convert::parse;
pub use kind::SyntaxKind;
pub use walk::{find_descendants, find_first_ancestor, is_ancestor, walk};
