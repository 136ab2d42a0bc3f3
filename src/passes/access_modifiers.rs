//! Explicit access modifiers on class members.
//!
//! Methods and fields of a class declaration that carry no accessibility
//! modifier get `private ` inserted, after any decorators. Constructors are
//! left alone.

use crate::rewrite::Replacement;
use crate::tree::{walk, NodeId, SyntaxKind, SyntaxTree};

#[must_use]
pub fn run(tree: &SyntaxTree, text: &str) -> Vec<Replacement> {
    let mut replacements = Vec::new();

    walk(tree, tree.root(), &mut |node| {
        if matches!(
            tree.kind(node),
            SyntaxKind::MethodDecl | SyntaxKind::PublicFieldDef
        ) && in_class_declaration(tree, node)
            && !is_constructor(tree, text, node)
            && tree
                .child_of_kind(node, SyntaxKind::AccessibilityModifier)
                .is_none()
        {
            replacements.push(Replacement::insert(insertion_point(tree, text, node), "private "));
        }
        false
    });

    replacements
}

fn in_class_declaration(tree: &SyntaxTree, member: NodeId) -> bool {
    tree.parent(member).is_some_and(|body| {
        tree.kind(body) == SyntaxKind::ClassBody
            && tree
                .parent(body)
                .is_some_and(|class| tree.kind(class) == SyntaxKind::ClassDecl)
    })
}

fn is_constructor(tree: &SyntaxTree, text: &str, member: NodeId) -> bool {
    tree.kind(member) == SyntaxKind::MethodDecl
        && tree
            .child_of_kind(member, SyntaxKind::PropertyIdentifier)
            .is_some_and(|name| tree.text_of(name, text) == "constructor")
}

/// The modifier goes at the member start, or after the last decorator when
/// the member is decorated.
fn insertion_point(tree: &SyntaxTree, text: &str, member: NodeId) -> usize {
    let last_decorator = tree
        .children(member)
        .iter()
        .rev()
        .copied()
        .find(|&c| tree.kind(c) == SyntaxKind::Decorator);
    match last_decorator {
        Some(d) => {
            let from = tree.end(d);
            text[from..]
                .find(|c: char| !c.is_whitespace())
                .map_or(from, |off| from + off)
        }
        None => tree.start(member),
    }
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
    fn test_bare_method_and_field() {
        assert_eq!(
            fix("class C { x = 1; run() {} }"),
            "class C { private x = 1; private run() {} }"
        );
    }

    #[test]
    fn test_modified_members_untouched() {
        let text = "class C { public x = 1; protected run() {} private z = 3; }";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_constructor_untouched() {
        let text = "class C { constructor() {} }";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_static_member_keeps_modifier_order() {
        assert_eq!(
            fix("class C { static x = 1; }"),
            "class C { private static x = 1; }"
        );
    }

    #[test]
    fn test_decorated_member() {
        assert_eq!(
            fix("class C { @memo\n  run() {} }"),
            "class C { @memo\n  private run() {} }"
        );
    }

    #[test]
    fn test_class_expression_untouched() {
        let text = "const C = class { run() {} };";
        assert_eq!(fix(text), text);
    }

    #[test]
    fn test_object_literal_untouched() {
        let text = "const o = { run() {} };";
        assert_eq!(fix(text), text);
    }
}
