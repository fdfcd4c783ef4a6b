//! Checksum traversals
//!
//! Both walks touch every node exactly once. The recursive one is what the
//! benchmark runs; the explicit-stack one keeps native stack use constant
//! and serves as an independent cross-check.

use super::{Node, Tree};

/// Count nodes by full recursive traversal
///
/// Leaf: 1. Branch: 1 + checksum(left) + checksum(right).
pub fn checksum(tree: &Tree) -> u64 {
    checksum_node(tree.root())
}

fn checksum_node(node: &Node) -> u64 {
    match node.children() {
        Some((left, right)) => 1 + checksum_node(left) + checksum_node(right),
        None => 1,
    }
}

/// Count nodes with an explicit stack
///
/// Stack holds at most `depth + 1` pending nodes.
pub fn checksum_iterative(tree: &Tree) -> u64 {
    let mut stack: Vec<&Node> = Vec::with_capacity(tree.depth() as usize + 1);
    stack.push(tree.root());

    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        if let Some((left, right)) = node.children() {
            stack.push(right);
            stack.push(left);
        }
    }

    count
}
