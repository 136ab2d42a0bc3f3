//! Arena storage for one parsed source unit.
//!
//! Nodes are addressed by [`NodeId`] (an index into a flat `Vec`), hold a
//! non-owning parent index and an ordered child list, and carry the byte span
//! `[start, end)` of the text they cover. Children of a node have disjoint,
//! ordered spans contained in the parent's span; nothing here is mutated once
//! a tree has been handed to the passes.

use crate::tree::kind::SyntaxKind;

/// Index of a node in a [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One syntax tree node.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    /// Byte offset of the first byte covered by this node.
    pub start: usize,
    /// Byte offset one past the last byte covered by this node.
    pub end: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Read-only syntax tree for one source unit.
///
/// The root is always node 0 and has kind [`SyntaxKind::SourceFile`].
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub(crate) fn new() -> Self {
        SyntaxTree { nodes: Vec::new() }
    }

    /// Append a node; if `parent` is given, the new node is recorded as its
    /// next child. Callers must push children in source order.
    pub(crate) fn push(
        &mut self,
        kind: SyntaxKind,
        start: usize,
        end: usize,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            kind,
            start,
            end,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        id
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id.index()].kind
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    #[must_use]
    pub fn start(&self, id: NodeId) -> usize {
        self.nodes[id.index()].start
    }

    #[must_use]
    pub fn end(&self, id: NodeId) -> usize {
        self.nodes[id.index()].end
    }

    /// Slice of the original text covered by this node.
    ///
    /// Spans come from the parser, so they are valid byte ranges of the text
    /// the unit was parsed from; an out-of-range span yields "".
    #[must_use]
    pub fn text_of<'a>(&self, id: NodeId, text: &'a str) -> &'a str {
        let node = &self.nodes[id.index()];
        text.get(node.start..node.end).unwrap_or("")
    }

    /// First child with the given kind, if any.
    #[must_use]
    pub fn child_of_kind(&self, id: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&c| self.kind(c) == kind)
    }
}

/// Incremental construction of a [`SyntaxTree`], used by the converter and by
/// tests that need hand-built trees.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: SyntaxTree,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Start a tree whose root spans `[0, len)`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut tree = SyntaxTree::new();
        let root = tree.push(SyntaxKind::SourceFile, 0, len, None);
        TreeBuilder {
            tree,
            stack: vec![root],
        }
    }

    /// Open a node; subsequent nodes become its children until [`Self::close`].
    pub fn open(&mut self, kind: SyntaxKind, start: usize, end: usize) -> NodeId {
        let parent = self.stack.last().copied();
        let id = self.tree.push(kind, start, end, parent);
        self.stack.push(id);
        id
    }

    /// Close the most recently opened node.
    pub fn close(&mut self) {
        // The root stays on the stack so stray closes cannot orphan nodes.
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Add a childless node under the currently open one.
    pub fn leaf(&mut self, kind: SyntaxKind, start: usize, end: usize) -> NodeId {
        let parent = self.stack.last().copied();
        self.tree.push(kind, start, end, parent)
    }

    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        self.tree
    }
}
