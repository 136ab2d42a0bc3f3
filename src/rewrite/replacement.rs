//! Offset-addressed text edits: ordering, merging, and application.
//!
//! Every pass proposes [`Replacement`]s against the *original* source text.
//! The pipeline merges adjacent edits and applies the result in one
//! left-to-right rewrite, so passes compose without knowing about each other.
//!
//! Conflict policy: overlapping edits are not an error. [`apply`] keeps the
//! earlier edit in sort order and silently drops the later overlapping one.
//! This keeps a multi-pass pipeline robust against pass interaction, at the
//! cost of losing the losing edit; the behavior is deterministic and covered
//! by tests.

use std::cmp::Ordering;

/// Replace `text[start..end]` with `value`. An insertion has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub value: String,
}

impl Replacement {
    #[must_use]
    pub fn new(start: usize, end: usize, value: impl Into<String>) -> Self {
        Replacement {
            start,
            end,
            value: value.into(),
        }
    }

    /// An insertion at `offset`.
    #[must_use]
    pub fn insert(offset: usize, value: impl Into<String>) -> Self {
        Replacement::new(offset, offset, value)
    }

    /// A deletion of `text[start..end]`.
    #[must_use]
    pub fn delete(start: usize, end: usize) -> Self {
        Replacement::new(start, end, "")
    }
}

/// Total order over replacements: `start` ascending, then `end` ascending,
/// with one tie-break: a bare `;` insertion sorts first among co-located
/// edits. Statement terminators must land before brace insertions proposed
/// at the same offset by another pass.
fn compare(a: &Replacement, b: &Replacement) -> Ordering {
    if a.start != b.start {
        return a.start.cmp(&b.start);
    }
    if a.value == ";" && b.value != ";" {
        return Ordering::Less;
    }
    if b.value == ";" && a.value != ";" {
        return Ordering::Greater;
    }
    a.end.cmp(&b.end)
}

/// Stable sort into the documented total order.
pub fn sort(replacements: &mut [Replacement]) {
    replacements.sort_by(compare);
}

/// Sort, then fuse adjacent edits: where one edit's `end` equals the next
/// edit's `start`, the two become a single edit spanning both with the
/// values concatenated. Non-adjacent edits are untouched.
#[must_use]
pub fn merge(mut replacements: Vec<Replacement>) -> Vec<Replacement> {
    if replacements.is_empty() {
        return replacements;
    }
    sort(&mut replacements);
    let mut result: Vec<Replacement> = Vec::with_capacity(replacements.len());
    for r in replacements {
        match result.last_mut() {
            Some(last) if last.end == r.start => {
                last.end = r.end;
                last.value.push_str(&r.value);
            }
            _ => result.push(r),
        }
    }
    result
}

/// Apply replacements to `text`, producing the rewritten text.
///
/// Edits are sorted; any edit starting before the previous kept edit's end
/// is dropped (first in sort order wins). The survivors are spliced against
/// original-text coordinates in a single left-to-right rewrite, so a
/// non-overlapping input set is reproduced exactly as requested.
#[must_use]
pub fn apply(text: &str, mut replacements: Vec<Replacement>) -> String {
    sort(&mut replacements);

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for r in replacements {
        // Overlap with a previously kept edit: the earlier-sorted edit wins.
        if r.start < cursor {
            continue;
        }
        let start = r.start.min(text.len());
        let end = r.end.clamp(start, text.len());
        result.push_str(&text[cursor..start]);
        result.push_str(&r.value);
        cursor = end;
    }
    result.push_str(&text[cursor..]);
    result
}
