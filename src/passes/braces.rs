//! Brace enforcement: single-statement `if`/`else` arms and loop bodies get
//! wrapped in blocks, and `else { if ... }` collapses to `else if`.

use crate::rewrite::Replacement;
use crate::tree::{walk, NodeId, SyntaxKind, SyntaxTree};

#[must_use]
pub fn run(tree: &SyntaxTree, _text: &str) -> Vec<Replacement> {
    let mut replacements = Vec::new();

    walk(tree, tree.root(), &mut |node| {
        match tree.kind(node) {
            SyntaxKind::IfStatement => {
                // children: condition, consequence, optional else clause
                let consequence = tree
                    .children(node)
                    .iter()
                    .skip(1)
                    .copied()
                    .find(|&c| tree.kind(c) != SyntaxKind::ElseClause);
                if let Some(stmt) = consequence {
                    if tree.kind(stmt) != SyntaxKind::Block {
                        wrap(&mut replacements, tree, stmt);
                    }
                }
            }
            SyntaxKind::ElseClause => {
                if let Some(&stmt) = tree.children(node).first() {
                    match tree.kind(stmt) {
                        // `else if` chains stay flat
                        SyntaxKind::IfStatement => {}
                        SyntaxKind::Block => {
                            // `else { if ... }` with nothing else collapses
                            let kids = tree.children(stmt);
                            if kids.len() == 1 && tree.kind(kids[0]) == SyntaxKind::IfStatement {
                                replacements
                                    .push(Replacement::delete(tree.start(stmt), tree.start(stmt) + 1));
                                replacements
                                    .push(Replacement::delete(tree.end(stmt) - 1, tree.end(stmt)));
                            }
                        }
                        _ => wrap(&mut replacements, tree, stmt),
                    }
                }
            }
            kind if kind.is_iteration() => {
                // `do body while (cond)` puts the body first, every other
                // loop puts it last
                let body = if kind == SyntaxKind::DoStatement {
                    tree.children(node).first().copied()
                } else {
                    tree.children(node).last().copied()
                };
                if let Some(stmt) = body {
                    if tree.kind(stmt) != SyntaxKind::Block {
                        wrap(&mut replacements, tree, stmt);
                    }
                }
            }
            _ => {}
        }
        false
    });

    replacements
}

fn wrap(replacements: &mut Vec<Replacement>, tree: &SyntaxTree, stmt: NodeId) {
    replacements.push(Replacement::insert(tree.start(stmt), "{"));
    replacements.push(Replacement::insert(tree.end(stmt), "}"));
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
    fn test_bare_if_arm() {
        assert_eq!(fix("if (c) foo();"), "if (c) {foo();}");
    }

    #[test]
    fn test_braced_if_untouched() {
        let text = "if (c) { foo(); }";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_bare_else_arm() {
        assert_eq!(
            fix("if (c) foo(); else bar();"),
            "if (c) {foo();} else {bar();}"
        );
    }

    #[test]
    fn test_else_if_chain_untouched() {
        let text = "if (a) { f(); } else if (b) { g(); }";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_else_block_around_if_collapses() {
        assert_eq!(
            fix("if (a) { f(); } else { if (b) { g(); } }"),
            "if (a) { f(); } else  if (b) { g(); } "
        );
    }

    #[test]
    fn test_bare_while_body() {
        assert_eq!(fix("while (c) tick();"), "while (c) {tick();}");
    }

    #[test]
    fn test_bare_for_body() {
        assert_eq!(
            fix("for (let i = 0; i < n; i++) use(i);"),
            "for (let i = 0; i < n; i++) {use(i);}"
        );
    }

    #[test]
    fn test_bare_do_body() {
        assert_eq!(fix("do tick(); while (c);"), "do {tick();} while (c);");
    }

    #[test]
    fn test_bare_for_in_body() {
        assert_eq!(
            fix("for (const k in o) use(k);"),
            "for (const k in o) {use(k);}"
        );
    }
}
