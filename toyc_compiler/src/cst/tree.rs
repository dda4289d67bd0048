//! Arena-backed left-child/right-sibling tree

use serde::Serialize;

/// Stable index of a node in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub text: String,
    pub line: u32,
    pub child: Option<NodeId>,
    pub sibling: Option<NodeId>,
}

/// Concrete syntax tree. Node 0 is the root; links only point forward in
/// the arena, so every walk terminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcreteSyntaxTree {
    nodes: Vec<TreeNode>,
}

impl ConcreteSyntaxTree {
    /// Start a tree from its root token
    pub(crate) fn with_root(text: String, line: u32) -> Self {
        Self {
            nodes: vec![TreeNode {
                text,
                line,
                child: None,
                sibling: None,
            }],
        }
    }

    /// Append a node as the child of `parent`
    pub(crate) fn attach_child(&mut self, parent: NodeId, text: String, line: u32) -> NodeId {
        let id = self.push(text, line);
        self.nodes[parent.0].child = Some(id);
        id
    }

    /// Append a node as the sibling of `previous`
    pub(crate) fn attach_sibling(&mut self, previous: NodeId, text: String, line: u32) -> NodeId {
        let id = self.push(text, line);
        self.nodes[previous.0].sibling = Some(id);
        id
    }

    fn push(&mut self, text: String, line: u32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            text,
            line,
            child: None,
            sibling: None,
        });
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].child
    }

    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].sibling
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn line(&self, id: NodeId) -> u32 {
        self.nodes[id.0].line
    }

    /// Whether the walk can continue past `id`
    pub fn has_successor(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.sibling.is_some() || node.child.is_some()
    }

    /// Sibling if present, otherwise child
    pub fn next_in_walk(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        node.sibling.or(node.child)
    }

    /// Every node in sibling-preferred order, starting at the root
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            next: Some(self.root()),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Iterator over a tree in walk order
pub struct Walk<'a> {
    tree: &'a ConcreteSyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_in_walk(current);
        Some(current)
    }
}
