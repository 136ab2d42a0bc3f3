//! One declaration per statement.
//!
//! `var a = 1, b = 2;` becomes two statements. Comments living between the
//! declarators are carried over as their own lines, in order. Lists where
//! nothing is initialized (`let a, b;`) and loop headers are left alone.

use crate::rewrite::Replacement;
use crate::tree::{walk, NodeId, SyntaxKind, SyntaxTree};

#[must_use]
pub fn run(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    let mut replacements = Vec::new();

    walk(tree, tree.root(), &mut |node| {
        if tree.kind(node) == SyntaxKind::VariableDeclarationList
            && !tree.parent(node).is_some_and(|p| {
                matches!(
                    tree.kind(p),
                    SyntaxKind::ForStatement | SyntaxKind::ForInStatement
                )
            })
        {
            if let Some(value) = split_list(tree, text, node) {
                replacements.push(Replacement::new(tree.start(node), tree.end(node), value));
            }
        }
        false
    });

    replacements
}

fn split_list(tree: &SyntaxTree, text: &str, list: NodeId) -> Option<String> {
    let decls: Vec<NodeId> = tree
        .children(list)
        .iter()
        .copied()
        .filter(|&c| tree.kind(c) == SyntaxKind::VariableDeclaration)
        .collect();
    if decls.len() < 2 {
        return None;
    }
    if !decls.iter().any(|&d| has_initializer(tree, d)) {
        return None;
    }
    let keyword = tree.children(list).iter().copied().find(|&c| {
        matches!(
            tree.kind(c),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword
        )
    })?;
    let kw = tree.text_of(keyword, text);

    let mut parts: Vec<String> = Vec::new();
    let mut prev_end = tree.end(keyword);
    for &decl in &decls {
        if let Some(gap) = text.get(prev_end..tree.start(decl)) {
            parts.extend(comments_in(gap).into_iter().map(str::to_string));
        }
        parts.push(format!("{kw} {};", tree.text_of(decl, text)));
        prev_end = tree.end(decl);
    }
    if let Some(tail) = text.get(prev_end..tree.end(list)) {
        parts.extend(comments_in(tail).into_iter().map(str::to_string));
    }
    Some(parts.join("\n"))
}

fn has_initializer(tree: &SyntaxTree, decl: NodeId) -> bool {
    tree.children(decl)
        .iter()
        .skip(1)
        .any(|&c| tree.kind(c) != SyntaxKind::TypeAnnotation)
}

/// Comment slices inside a gap between declarators, in order. The gap only
/// ever holds commas, whitespace, and comments.
fn comments_in(gap: &str) -> Vec<&str> {
    let bytes = gap.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'/' && bytes[i + 1] == b'/' {
            let end = gap[i..].find('\n').map_or(gap.len(), |off| i + off);
            out.push(gap[i..end].trim_end());
            i = end;
        } else if bytes[i] == b'/' && bytes[i + 1] == b'*' {
            let end = gap[i + 2..]
                .find("*/")
                .map_or(gap.len(), |off| i + 2 + off + 2);
            out.push(&gap[i..end]);
            i = end;
        } else {
            i += 1;
        }
    }
    out
}
