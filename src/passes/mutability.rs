//! Scope-aware mutability narrowing: `var` to `let`/`const`, `let` to
//! `const`.
//!
//! This is the only pass whose correctness depends on non-local semantics.
//! For every declaration keyword it resolves the governing hoisting scope
//! and the nearest block scope, collects every reference to each declared
//! name within the hoisting scope, classifies writes, and proposes the
//! tightest keyword that provably preserves behavior. Any candidate the
//! analysis cannot prove safe is left alone; false negatives are fine,
//! false positives are not.

use crate::rewrite::Replacement;
use crate::tree::{
    find_descendants, find_first_ancestor, is_ancestor, walk, NodeId, SyntaxKind, SyntaxTree,
};

/// Per-invocation counters for the narrowing pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MutabilityStats {
    pub vars_to_let: usize,
    pub vars_to_const: usize,
    pub lets_to_const: usize,
    pub vars_skipped: usize,
    pub lets_skipped: usize,
}

/// Propose keyword rewrites for every `var` and `let` declaration in the
/// unit. Each replacement covers exactly the keyword token.
#[must_use]
pub fn run(tree: &SyntaxTree, text: &str) -> (Vec<Replacement>, MutabilityStats) {
    let mut replacements = Vec::new();
    let mut stats = MutabilityStats::default();

    walk(tree, tree.root(), &mut |node| {
        match tree.kind(node) {
            SyntaxKind::VarKeyword => {
                if can_scope_to_block(tree, text, node) {
                    let value = if can_be_const(tree, text, node) {
                        stats.vars_to_const += 1;
                        "const"
                    } else {
                        stats.vars_to_let += 1;
                        "let"
                    };
                    replacements.push(Replacement::new(tree.start(node), tree.end(node), value));
                } else {
                    stats.vars_skipped += 1;
                }
            }
            SyntaxKind::LetKeyword => {
                if can_be_const(tree, text, node) {
                    stats.lets_to_const += 1;
                    replacements.push(Replacement::new(tree.start(node), tree.end(node), "const"));
                } else {
                    stats.lets_skipped += 1;
                }
            }
            _ => {}
        }
        false
    });

    (replacements, stats)
}

/// The hoisting scope of a node: the nearest enclosing function-like body,
/// or the whole unit.
fn hoisting_scope(tree: &SyntaxTree, node: NodeId) -> NodeId {
    match find_first_ancestor(tree, node, |n| tree.kind(n).is_function_like()) {
        Some(f) => tree.children(f).last().copied().unwrap_or(f),
        None => tree.root(),
    }
}

/// Flatten the bound names of every declarator in a declaration list.
/// `None` means the list contains a binding shape the analysis does not
/// understand, which makes the whole list ineligible.
fn declared_names<'a>(tree: &SyntaxTree, text: &'a str, list: NodeId) -> Option<Vec<&'a str>> {
    let mut names = Vec::new();
    for &decl in tree.children(list) {
        if tree.kind(decl) != SyntaxKind::VariableDeclaration {
            continue;
        }
        let &pattern = tree.children(decl).first()?;
        if !collect_binding_names(tree, text, pattern, &mut names) {
            return None;
        }
    }
    Some(names)
}

fn collect_binding_names<'a>(
    tree: &SyntaxTree,
    text: &'a str,
    node: NodeId,
    out: &mut Vec<&'a str>,
) -> bool {
    match tree.kind(node) {
        SyntaxKind::Identifier => {
            out.push(tree.text_of(node, text));
            true
        }
        SyntaxKind::ObjectPattern | SyntaxKind::ArrayPattern => {
            tree.children(node).iter().all(|&c| match tree.kind(c) {
                SyntaxKind::Identifier
                | SyntaxKind::ObjectPattern
                | SyntaxKind::ArrayPattern => collect_binding_names(tree, text, c, out),
                // `key: binding`; only the binding side introduces a name
                SyntaxKind::PairPattern => tree
                    .children(c)
                    .last()
                    .is_some_and(|&b| collect_binding_names(tree, text, b, out)),
                // `binding = default` and `...binding`
                SyntaxKind::AssignmentPattern | SyntaxKind::RestPattern => tree
                    .children(c)
                    .first()
                    .is_some_and(|&b| collect_binding_names(tree, text, b, out)),
                _ => false,
            })
        }
        _ => false,
    }
}

/// Every identifier occurrence of `name` within `scope`, excluding the
/// property side of a member access (`b` in `a.b` is not a reference to the
/// binding, but `a` is).
fn references(tree: &SyntaxTree, text: &str, scope: NodeId, name: &str) -> Vec<NodeId> {
    find_descendants(tree, scope, |n| {
        if tree.kind(n) != SyntaxKind::Identifier || tree.text_of(n, text) != name {
            return false;
        }
        if let Some(p) = tree.parent(n) {
            if tree.kind(p) == SyntaxKind::PropertyAccess {
                return tree.children(p).first() == Some(&n);
            }
        }
        true
    })
}

fn declarator_name<'a>(tree: &SyntaxTree, text: &'a str, decl: NodeId) -> Option<&'a str> {
    tree.children(decl).first().map(|&n| tree.text_of(n, text))
}

/// Whether a `var` declaration can become block-scoped: every reference to
/// every declared name lies inside the nearest block scope, none precedes
/// the declaration (that would have relied on hoisting), and none belongs
/// to a shadowing declaration of the same name.
fn can_scope_to_block(tree: &SyntaxTree, text: &str, keyword: NodeId) -> bool {
    let Some(list) = tree.parent(keyword) else {
        return false;
    };
    if tree.kind(list) != SyntaxKind::VariableDeclarationList {
        return false;
    }
    let scope = hoisting_scope(tree, keyword);
    let Some(block) = find_first_ancestor(tree, keyword, |n| tree.kind(n).is_block_scope()) else {
        return false;
    };
    let Some(names) = declared_names(tree, text, list) else {
        return false;
    };

    names.iter().all(|name| {
        references(tree, text, scope, name).iter().all(|&r| {
            if !is_ancestor(tree, block, r) || tree.start(r) < tree.start(keyword) {
                return false;
            }
            match find_first_ancestor(tree, r, |n| {
                tree.kind(n) == SyntaxKind::VariableDeclaration
            }) {
                None => true,
                Some(decl) => {
                    tree.parent(decl) == Some(list)
                        || declarator_name(tree, text, decl) != Some(name)
                }
            }
        })
    })
}

/// Whether a block-scoped (or about-to-be block-scoped) declaration can
/// become `const`: every declarator is initialized, the list is not
/// exported, and no write in the block targets a declared name itself.
/// Mutating a property of a bound object is still allowed.
fn can_be_const(tree: &SyntaxTree, text: &str, keyword: NodeId) -> bool {
    let Some(list) = tree.parent(keyword) else {
        return false;
    };
    if tree.kind(list) != SyntaxKind::VariableDeclarationList {
        return false;
    }
    let Some(scope) = find_first_ancestor(tree, keyword, |n| tree.kind(n).is_block_scope()) else {
        return false;
    };

    for &decl in tree.children(list) {
        if tree.kind(decl) == SyntaxKind::VariableDeclaration && !has_initializer(tree, decl) {
            return false;
        }
    }

    // Exported declarations keep assignability for external consumers.
    if tree.parent(list).is_some_and(|p| tree.kind(p) == SyntaxKind::ExportStatement) {
        return false;
    }

    let Some(names) = declared_names(tree, text, list) else {
        return false;
    };

    let mutations = find_descendants(tree, scope, |n| tree.kind(n).is_mutation());
    !mutations
        .iter()
        .any(|&m| mutates_name(tree, text, m, &names))
}

fn has_initializer(tree: &SyntaxTree, decl: NodeId) -> bool {
    tree.children(decl)
        .iter()
        .skip(1)
        .any(|&c| tree.kind(c) != SyntaxKind::TypeAnnotation)
}

fn mutates_name(tree: &SyntaxTree, text: &str, mutation: NodeId, names: &[&str]) -> bool {
    match tree.kind(mutation) {
        SyntaxKind::AssignmentExpr | SyntaxKind::CompoundAssignmentExpr => {
            let Some(&left) = tree.children(mutation).first() else {
                return false;
            };
            if tree.kind(left) == SyntaxKind::PropertyAccess {
                return false;
            }
            !find_descendants(tree, left, |n| names.contains(&tree.text_of(n, text))).is_empty()
        }
        SyntaxKind::UpdateExpr => tree
            .children(mutation)
            .first()
            .is_some_and(|&operand| names.contains(&tree.text_of(operand, text))),
        _ => false,
    }
}
