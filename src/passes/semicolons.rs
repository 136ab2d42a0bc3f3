//! Semicolon insertion for statements that rely on automatic semicolon
//! insertion, plus interface members separated by commas.

use std::collections::BTreeSet;

use crate::rewrite::Replacement;
use crate::tree::{walk, NodeId, SyntaxKind, SyntaxTree};

/// Propose `;` insertions for every unterminated statement-like node.
#[must_use]
pub fn run(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    // Insertion offsets are deduplicated: a statement and its wrapper (an
    // export, say) may both end at the same offset.
    let mut inserts: BTreeSet<usize> = BTreeSet::new();
    let mut replacements = Vec::new();

    walk(tree, tree.root(), &mut |node| {
        let kind = tree.kind(node);
        let statement_like = match kind {
            // Loop-header lists are terminated by the loop syntax itself
            SyntaxKind::VariableDeclarationList => !tree.parent(node).is_some_and(|p| {
                matches!(
                    tree.kind(p),
                    SyntaxKind::ForStatement | SyntaxKind::ForInStatement
                )
            }),
            // `export function f() {}` and friends terminate themselves
            SyntaxKind::ExportStatement => !wraps_declaration(tree, node),
            SyntaxKind::FunctionSignature => true,
            // Interface members are handled per body below
            SyntaxKind::MethodSignature => !tree
                .parent(node)
                .is_some_and(|p| tree.kind(p) == SyntaxKind::InterfaceBody),
            k => k.wants_semicolon(),
        };
        if statement_like && !terminated(tree, text, node) {
            inserts.insert(tree.end(node));
        }

        if kind == SyntaxKind::InterfaceBody {
            for &member in tree.children(node) {
                if !matches!(
                    tree.kind(member),
                    SyntaxKind::PropertySignature | SyntaxKind::MethodSignature
                ) {
                    continue;
                }
                let end = tree.end(member);
                match text.as_bytes().get(end) {
                    Some(b';') => {}
                    Some(b',') => replacements.push(Replacement::new(end, end + 1, ";")),
                    _ => {
                        if !tree.text_of(member, text).ends_with(';') {
                            inserts.insert(end);
                        }
                    }
                }
            }
        }
        false
    });

    replacements.extend(inserts.into_iter().map(|pos| Replacement::insert(pos, ";")));
    replacements
}

/// The grammar attaches a trailing `;` to some node kinds and leaves it a
/// sibling token for others, so both placements count as terminated.
fn terminated(tree: &SyntaxTree, text: &str, node: NodeId) -> bool {
    tree.text_of(node, text).ends_with(';') || text.as_bytes().get(tree.end(node)) == Some(&b';')
}

fn wraps_declaration(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.children(node).iter().any(|&c| {
        matches!(
            tree.kind(c),
            SyntaxKind::FunctionDecl
                | SyntaxKind::FunctionExpr
                | SyntaxKind::FunctionSignature
                | SyntaxKind::ClassDecl
                | SyntaxKind::ClassExpr
                | SyntaxKind::EnumDecl
                | SyntaxKind::InterfaceDecl
                | SyntaxKind::TypeAliasDecl
                | SyntaxKind::VariableDeclarationList
        )
    })
}
