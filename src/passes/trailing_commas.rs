//! Trailing commas in constructor parameter lists.
//!
//! Constructors with long parameter lists or parameter properties churn in
//! diffs; a trailing comma after the last parameter keeps additions to one
//! line. Rest parameters cannot be followed by a comma.

use std::collections::BTreeSet;

use crate::rewrite::Replacement;
use crate::tree::{walk, NodeId, SyntaxKind, SyntaxTree};

#[must_use]
pub fn run(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    let mut inserts: BTreeSet<usize> = BTreeSet::new();

    walk(tree, tree.root(), &mut |node| {
        if tree.kind(node) == SyntaxKind::MethodDecl && is_constructor(tree, text, node) {
            if let Some(params) = tree.child_of_kind(node, SyntaxKind::FormalParameters) {
                let params: Vec<NodeId> = tree
                    .children(params)
                    .iter()
                    .copied()
                    .filter(|&p| tree.kind(p) == SyntaxKind::Parameter)
                    .collect();
                let qualifies = params.len() >= 4
                    || params.iter().any(|&p| {
                        tree.child_of_kind(p, SyntaxKind::AccessibilityModifier)
                            .is_some()
                    });
                if qualifies {
                    if let Some(&last) = params.last() {
                        let end = tree.end(last);
                        if tree.child_of_kind(last, SyntaxKind::RestPattern).is_none()
                            && text.as_bytes().get(end) != Some(&b',')
                        {
                            inserts.insert(end);
                        }
                    }
                }
            }
        }
        false
    });

    inserts
        .into_iter()
        .map(|pos| Replacement::insert(pos, ","))
        .collect()
}

fn is_constructor(tree: &SyntaxTree, text: &str, method: NodeId) -> bool {
    tree.children(method)
        .iter()
        .copied()
        .find(|&c| {
            matches!(
                tree.kind(c),
                SyntaxKind::PropertyIdentifier | SyntaxKind::Identifier
            )
        })
        .is_some_and(|name| tree.text_of(name, text) == "constructor")
}
