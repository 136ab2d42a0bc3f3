//! Import grooming: merging duplicate named imports from one module, and
//! dropping imports nothing references.
//!
//! Both passes look only at top-level import statements of the unit; module
//! resolution across files is out of scope.

use std::collections::HashSet;

use crate::rewrite::Replacement;
use crate::tree::{find_descendants, find_first_ancestor, walk, NodeId, SyntaxKind, SyntaxTree};

/// Name a specifier can use to opt out of unused-import removal, for
/// imports with side effects the analysis cannot see.
pub const KEEP_MARKER: &str = "DontRemoveThisImport";

/// Merge `import {a} from 'm'; import {b} from 'm';` into one statement.
///
/// Only pure named imports are merged; defaults and namespace imports bind
/// a name the merge would drop, so statements carrying them stay put.
#[must_use]
pub fn combine(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    let mut replacements = Vec::new();
    // Module name to declarations, in first-seen order
    let mut groups: Vec<(&str, Vec<NodeId>)> = Vec::new();

    for decl in top_level_imports(tree) {
        let Some(clause) = tree.child_of_kind(decl, SyntaxKind::ImportClause) else {
            continue;
        };
        if tree.child_of_kind(clause, SyntaxKind::NamedImports).is_none()
            || tree.child_of_kind(clause, SyntaxKind::Identifier).is_some()
            || tree
                .child_of_kind(clause, SyntaxKind::NamespaceImport)
                .is_some()
        {
            continue;
        }
        let Some(source) = tree.child_of_kind(decl, SyntaxKind::StringLiteral) else {
            continue;
        };
        let module = unquote(tree.text_of(source, text));
        match groups.iter_mut().find(|(m, _)| *m == module) {
            Some((_, decls)) => decls.push(decl),
            None => groups.push((module, vec![decl])),
        }
    }

    for (_, decls) in groups.iter().filter(|(_, d)| d.len() > 1) {
        let mut specifiers: Vec<&str> = Vec::new();
        for (i, &decl) in decls.iter().enumerate() {
            if let Some(named) = named_imports(tree, decl) {
                for &spec in tree.children(named) {
                    if tree.kind(spec) == SyntaxKind::ImportSpecifier {
                        specifiers.push(tree.text_of(spec, text));
                    }
                }
            }
            if i > 0 {
                // The extra byte takes the trailing newline with it
                replacements.push(Replacement::delete(tree.start(decl), tree.end(decl) + 1));
            }
        }
        if let Some(named) = named_imports(tree, decls[0]) {
            replacements.push(Replacement::new(
                tree.start(named),
                tree.end(named),
                format!("{{{}}}", specifiers.join(", ")),
            ));
        }
    }

    replacements
}

/// Remove imported names never referenced outside an import statement.
#[must_use]
pub fn remove_unused(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    let mut imported: Vec<&str> = Vec::new();
    for decl in top_level_imports(tree) {
        let Some(clause) = tree.child_of_kind(decl, SyntaxKind::ImportClause) else {
            continue;
        };
        for &binding in tree.children(clause) {
            match tree.kind(binding) {
                SyntaxKind::Identifier => imported.push(tree.text_of(binding, text)),
                SyntaxKind::NamedImports => {
                    for &spec in tree.children(binding) {
                        if tree.kind(spec) != SyntaxKind::ImportSpecifier {
                            continue;
                        }
                        if let Some(name) = bound_name(tree, text, spec) {
                            if name != KEEP_MARKER {
                                imported.push(name);
                            }
                        }
                    }
                }
                SyntaxKind::NamespaceImport => {
                    if let Some(name) = tree.child_of_kind(binding, SyntaxKind::Identifier) {
                        imported.push(tree.text_of(name, text));
                    }
                }
                _ => {}
            }
        }
    }

    let mut used: HashSet<&str> = HashSet::new();
    walk(tree, tree.root(), &mut |n| {
        if tree.kind(n) == SyntaxKind::Identifier
            && find_first_ancestor(tree, n, |a| tree.kind(a) == SyntaxKind::ImportDecl).is_none()
        {
            used.insert(tree.text_of(n, text));
        }
        false
    });

    let unused: HashSet<&str> = imported.iter().copied().filter(|n| !used.contains(n)).collect();
    if unused.is_empty() {
        return Vec::new();
    }

    let mut replacements = Vec::new();
    for decl in top_level_imports(tree) {
        let Some(clause) = tree.child_of_kind(decl, SyntaxKind::ImportClause) else {
            continue;
        };
        let delete_whole = Replacement::delete(tree.start(decl), tree.end(decl) + 1);
        for &binding in tree.children(clause) {
            match tree.kind(binding) {
                SyntaxKind::Identifier => {
                    if unused.contains(tree.text_of(binding, text)) {
                        replacements.push(delete_whole.clone());
                    }
                }
                SyntaxKind::NamedImports => {
                    let specs: Vec<NodeId> = tree
                        .children(binding)
                        .iter()
                        .copied()
                        .filter(|&s| tree.kind(s) == SyntaxKind::ImportSpecifier)
                        .collect();
                    let keep: Vec<&str> = specs
                        .iter()
                        .filter(|&&s| {
                            bound_name(tree, text, s).is_none_or(|n| !unused.contains(n))
                        })
                        .map(|&s| tree.text_of(s, text))
                        .collect();
                    if keep.is_empty() {
                        replacements.push(delete_whole.clone());
                    } else if keep.len() < specs.len() {
                        replacements.push(Replacement::new(
                            tree.start(binding),
                            tree.end(binding),
                            format!("{{{}}}", keep.join(", ")),
                        ));
                    }
                }
                SyntaxKind::NamespaceImport => {
                    let name = tree.child_of_kind(binding, SyntaxKind::Identifier);
                    if name.is_some_and(|n| unused.contains(tree.text_of(n, text))) {
                        replacements.push(delete_whole.clone());
                    }
                }
                _ => {}
            }
        }
    }

    replacements
}

fn top_level_imports<'a>(tree: &'a SyntaxTree) -> impl Iterator<Item = NodeId> + 'a {
    tree.children(tree.root())
        .iter()
        .copied()
        .filter(|&n| tree.kind(n) == SyntaxKind::ImportDecl)
}

fn named_imports(tree: &SyntaxTree, decl: NodeId) -> Option<NodeId> {
    let clause = tree.child_of_kind(decl, SyntaxKind::ImportClause)?;
    tree.child_of_kind(clause, SyntaxKind::NamedImports)
}

/// The locally bound name of `a` or `a as b`.
fn bound_name<'a>(tree: &SyntaxTree, text: &'a str, spec: NodeId) -> Option<&'a str> {
    tree.children(spec)
        .iter()
        .rev()
        .copied()
        .find(|&c| tree.kind(c) == SyntaxKind::Identifier)
        .map(|n| tree.text_of(n, text))
}

fn unquote(source: &str) -> &str {
    let bytes = source.as_bytes();
    if bytes.len() >= 2
        && matches!(bytes[0], b'\'' | b'"' | b'`')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &source[1..source.len() - 1]
    } else {
        source
    }
}
