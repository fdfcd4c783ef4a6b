//! Tree node representation
//!
//! Every node is its own heap allocation. A leaf has no children, a branch
//! owns exactly two subtrees of equal depth.

use std::fmt;

/// Binary tree node
///
/// Fields are private: the only producer of nodes is [`super::build`], which
/// guarantees `left` and `right` are either both present or both absent.
#[derive(Debug)]
pub struct Node {
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    /// Allocate a leaf
    #[inline]
    pub(crate) fn leaf() -> Box<Node> {
        Box::new(Node {
            left: None,
            right: None,
        })
    }

    /// Allocate a branch owning both subtrees
    #[inline]
    pub(crate) fn branch(left: Box<Node>, right: Box<Node>) -> Box<Node> {
        Box::new(Node {
            left: Some(left),
            right: Some(right),
        })
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none()
    }

    /// Both children, or `None` for a leaf
    #[inline]
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some((&**left, &**right)),
            _ => None,
        }
    }
}

/// Owning handle for a built tree
///
/// Dropping it releases every node.
pub struct Tree {
    root: Box<Node>,
    depth: u32,
}

impl Tree {
    pub(crate) fn new(root: Box<Node>, depth: u32) -> Self {
        Self { root, depth }
    }

    /// Root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Depth the tree was built at
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl fmt::Debug for Tree {
    // Deriving would print every node.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("depth", &self.depth).finish()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree(depth={})", self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_no_children() {
        let leaf = Node::leaf();
        assert!(leaf.is_leaf());
        assert!(leaf.children().is_none());
    }

    #[test]
    fn test_branch_exposes_both_children() {
        let node = Node::branch(Node::leaf(), Node::leaf());
        assert!(!node.is_leaf());

        let (left, right) = node.children().expect("branch has children");
        assert!(left.is_leaf());
        assert!(right.is_leaf());
    }

    #[test]
    fn test_debug_does_not_walk_nodes() {
        let tree = Tree::new(Node::branch(Node::leaf(), Node::leaf()), 1);
        assert_eq!(format!("{:?}", tree), "Tree { depth: 1 }");
        assert_eq!(tree.to_string(), "tree(depth=1)");
    }
}
