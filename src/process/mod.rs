//! Rewrite orchestration.
//!
//! One parsed unit flows through the enabled passes in a fixed order. Every
//! pass reads the same immutable tree and original text and proposes edits;
//! nothing is applied until all passes have run. The proposals are then
//! merged and applied in a single rewrite, so pass order never changes what
//! an individual pass computes, only which edit wins a same-offset tie.
//!
//! The main entry point is [`rewrite_text`], which parses and rewrites one
//! source unit and reports per-pass statistics alongside the new text.

pub mod pipeline;

pub use pipeline::{rewrite_text, rewrite_unit, PassStats, RewriteOutcome};
