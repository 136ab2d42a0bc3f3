//! The textual edit model shared by every pass.

pub mod replacement;

pub use replacement::{apply, merge, sort, Replacement};
