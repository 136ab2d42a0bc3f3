//! Generic depth-first traversal and the ancestor/descendant queries built
//! on it.
//!
//! The walker never mutates the tree and has no side effects beyond invoking
//! the visit callback. A visit callback returning `true` terminates the
//! traversal early, which makes [`walk`] double as an existence query.

use crate::tree::arena::{NodeId, SyntaxTree};

/// Visit `node`, then each child in source order, depth-first pre-order.
///
/// Returns `true` as soon as `visit` does; `false` once the subtree is
/// exhausted.
pub fn walk<F>(tree: &SyntaxTree, node: NodeId, visit: &mut F) -> bool
where
    F: FnMut(NodeId) -> bool,
{
    if visit(node) {
        return true;
    }
    for i in 0..tree.children(node).len() {
        let child = tree.children(node)[i];
        if walk(tree, child, visit) {
            return true;
        }
    }
    false
}

/// Walk upward through parent links starting at `node` (inclusive) until the
/// predicate holds; `None` if the root is passed without a match.
pub fn find_first_ancestor<F>(tree: &SyntaxTree, node: NodeId, mut pred: F) -> Option<NodeId>
where
    F: FnMut(NodeId) -> bool,
{
    let mut current = node;
    loop {
        if pred(current) {
            return Some(current);
        }
        current = tree.parent(current)?;
    }
}

/// All nodes in the subtree of `node` (inclusive) matching the predicate, in
/// traversal order.
pub fn find_descendants<F>(tree: &SyntaxTree, node: NodeId, mut pred: F) -> Vec<NodeId>
where
    F: FnMut(NodeId) -> bool,
{
    let mut result = Vec::new();
    walk(tree, node, &mut |n| {
        if pred(n) {
            result.push(n);
        }
        false
    });
    result
}

/// Whether walking upward from `node` reaches `ancestor` (a node is its own
/// ancestor for this purpose).
#[must_use]
pub fn is_ancestor(tree: &SyntaxTree, ancestor: NodeId, node: NodeId) -> bool {
    let mut current = node;
    while current != ancestor {
        match tree.parent(current) {
            Some(p) => current = p,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::arena::TreeBuilder;
    use crate::tree::kind::SyntaxKind;

    /// root
    ///   Block [0,20)
    ///     Identifier [2,3)
    ///     Identifier [5,6)
    ///   ExpressionStatement [20,30)
    ///     Identifier [22,23)
    fn sample() -> (SyntaxTree, NodeId, Vec<NodeId>) {
        let mut b = TreeBuilder::new(30);
        let block = b.open(SyntaxKind::Block, 0, 20);
        let a = b.leaf(SyntaxKind::Identifier, 2, 3);
        let c = b.leaf(SyntaxKind::Identifier, 5, 6);
        b.close();
        b.open(SyntaxKind::ExpressionStatement, 20, 30);
        let d = b.leaf(SyntaxKind::Identifier, 22, 23);
        b.close();
        (b.finish(), block, vec![a, c, d])
    }

    #[test]
    fn test_walk_visits_preorder() {
        let (tree, _, _) = sample();
        let mut order = Vec::new();
        let stopped = walk(&tree, tree.root(), &mut |n| {
            order.push(tree.kind(n));
            false
        });
        assert!(!stopped);
        assert_eq!(
            order,
            vec![
                SyntaxKind::SourceFile,
                SyntaxKind::Block,
                SyntaxKind::Identifier,
                SyntaxKind::Identifier,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_walk_early_termination() {
        let (tree, _, _) = sample();
        let mut visited = 0;
        let stopped = walk(&tree, tree.root(), &mut |n| {
            visited += 1;
            tree.kind(n) == SyntaxKind::Block
        });
        assert!(stopped);
        // Root, then the block; nothing after the match
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_find_first_ancestor() {
        let (tree, block, ids) = sample();
        let a = ids[0];
        assert_eq!(
            find_first_ancestor(&tree, a, |n| tree.kind(n) == SyntaxKind::Block),
            Some(block)
        );
        // A node matching its own predicate is returned directly
        assert_eq!(
            find_first_ancestor(&tree, a, |n| tree.kind(n) == SyntaxKind::Identifier),
            Some(a)
        );
        assert_eq!(
            find_first_ancestor(&tree, a, |n| tree.kind(n) == SyntaxKind::EnumDecl),
            None
        );
    }

    #[test]
    fn test_find_descendants_in_order() {
        let (tree, block, ids) = sample();
        let idents = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::Identifier
        });
        assert_eq!(idents, ids);

        let in_block = find_descendants(&tree, block, |n| tree.kind(n) == SyntaxKind::Identifier);
        assert_eq!(in_block, &ids[..2]);
    }

    #[test]
    fn test_is_ancestor() {
        let (tree, block, ids) = sample();
        assert!(is_ancestor(&tree, tree.root(), ids[0]));
        assert!(is_ancestor(&tree, block, ids[1]));
        assert!(is_ancestor(&tree, block, block));
        // Sibling subtree
        assert!(!is_ancestor(&tree, block, ids[2]));
    }
}
