//! Explicit enum member values.
//!
//! Implicit numbering is fragile under reordering, so members without an
//! initializer get their implicit numeric value written out. A member whose
//! leading comment is exactly `// UNINITIALIZED` opts out while still
//! advancing the counter.

use crate::rewrite::Replacement;
use crate::tree::{walk, NodeId, SyntaxKind, SyntaxTree};

/// Comment marker that suppresses the initializer for one member.
pub const UNINITIALIZED_MARKER: &str = "// UNINITIALIZED";

#[must_use]
pub fn run(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    let mut replacements = Vec::new();

    walk(tree, tree.root(), &mut |node| {
        if tree.kind(node) == SyntaxKind::EnumDecl {
            if let Some(body) = tree.child_of_kind(node, SyntaxKind::EnumBody) {
                initialize_members(&mut replacements, tree, text, body);
            }
        }
        false
    });

    replacements
}

fn initialize_members(
    replacements: &mut Vec<Replacement>,
    tree: &SyntaxTree,
    text: &str,
    body: NodeId,
) {
    let members: Vec<NodeId> = tree
        .children(body)
        .iter()
        .copied()
        .filter(|&m| {
            matches!(
                tree.kind(m),
                SyntaxKind::EnumMember | SyntaxKind::PropertyIdentifier | SyntaxKind::StringLiteral
            )
        })
        .collect();

    if !members.iter().any(|&m| initializer(tree, m).is_none()) {
        return;
    }
    // Only all-numeric enums can be auto-numbered; anything else (string
    // enums, computed values) is left alone
    let values: Option<Vec<Option<i64>>> = members
        .iter()
        .map(|&m| match initializer(tree, m) {
            None => Some(None),
            Some(init) if tree.kind(init) == SyntaxKind::NumericLiteral => {
                tree.text_of(init, text).parse::<i64>().ok().map(Some)
            }
            Some(_) => None,
        })
        .collect();
    let Some(values) = values else {
        return;
    };

    let mut last: i64 = -1;
    let mut prev_end = tree.start(body);
    for (&member, value) in members.iter().zip(values) {
        match value {
            Some(v) => last = v,
            None => {
                if gap_has_marker(text, prev_end, tree.start(member)) {
                    last += 1;
                } else {
                    last += 1;
                    let at = member_name_end(tree, member);
                    replacements.push(Replacement::insert(at, format!(" = {last}")));
                }
            }
        }
        prev_end = tree.end(member);
    }
}

/// Initializer expression of a member, if any. Bare members are lowered as
/// plain name nodes and have none.
fn initializer(tree: &SyntaxTree, member: NodeId) -> Option<NodeId> {
    if tree.kind(member) != SyntaxKind::EnumMember {
        return None;
    }
    tree.children(member).iter().skip(1).last().copied()
}

fn member_name_end(tree: &SyntaxTree, member: NodeId) -> usize {
    match tree.children(member).first() {
        Some(&name) => tree.end(name),
        None => tree.end(member),
    }
}

/// Whether the text between the previous member and this one contains the
/// opt-out marker as a full comment line.
fn gap_has_marker(text: &str, from: usize, to: usize) -> bool {
    text.get(from..to)
        .is_some_and(|gap| gap.lines().any(|line| line.trim() == UNINITIALIZED_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::apply;
    use crate::tree::parse;

    fn fix(text: &str) -> String {
        let tree = parse(text).unwrap();
        apply(text, run(&tree, text))
    }

    #[test]
    fn test_bare_members_are_numbered() {
        assert_eq!(
            fix("enum E { A, B, C }"),
            "enum E { A = 0, B = 1, C = 2 }"
        );
    }

    #[test]
    fn test_numbering_continues_after_explicit_value() {
        assert_eq!(
            fix("enum E { A = 10, B, C }"),
            "enum E { A = 10, B = 11, C = 12 }"
        );
    }

    #[test]
    fn test_fully_initialized_enum_untouched() {
        let text = "enum E { A = 1, B = 2 }";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_string_enum_untouched() {
        let text = "enum E { A = 'a', B, C }";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_marker_opts_out_but_advances() {
        let text = "enum E {\n  A,\n  // UNINITIALIZED\n  B,\n  C,\n}";
        assert_eq!(
            fix(text),
            "enum E {\n  A = 0,\n  // UNINITIALIZED\n  B,\n  C = 2,\n}"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = fix("enum E { A, B = 5, C }");
        assert_eq!(fix(&once), once);
    }
}
