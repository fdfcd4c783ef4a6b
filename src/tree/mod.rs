//! Perfect binary trees
//!
//! A tree of depth `d` is built bottom-up, one heap allocation per node,
//! `2^(d+1) - 1` nodes in total. It is read by a checksum and then either
//! dropped straight away or kept alive for the whole run.

mod node;
mod traversal;

pub use node::{Node, Tree};
pub use traversal::{checksum, checksum_iterative};

/// Build a perfect binary tree of the given depth
///
/// Left subtree first, then right, then the parent, so the allocation
/// sequence is identical between runs. No upper bound is enforced here;
/// the caller picks a depth that fits in memory.
pub fn build(depth: u32) -> Tree {
    Tree::new(build_node(depth), depth)
}

fn build_node(depth: u32) -> Box<Node> {
    if depth == 0 {
        Node::leaf()
    } else {
        let left = build_node(depth - 1);
        let right = build_node(depth - 1);
        Node::branch(left, right)
    }
}

/// Node count of a perfect tree of depth `d`: `2^(d+1) - 1`
///
/// Only meaningful for `d < 64`.
#[inline]
pub fn expected_nodes(depth: u32) -> u64 {
    debug_assert!(depth < 64, "node count of depth {} overflows u64", depth);
    u64::MAX >> (63 - depth)
}
