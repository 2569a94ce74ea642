//! Pre-order traversals over a reconstructed [`Tree`].
//!
//! Every function here is pure: nothing is cached and the tree is never
//! modified, so callers simply re-traverse when they need another view.
//! Traversal uses an explicit stack, which keeps very deep dumps from
//! exhausting the call stack.

use crate::ids::NodeId;
use crate::node::{Child, Tree, TreeLeaf};

/// Returns every interior node in the subtree rooted at `node` (including
/// `node` itself) for which `pred` holds, in pre-order.
pub fn find_all_matching(
    tree: &Tree,
    node: NodeId,
    mut pred: impl FnMut(&str) -> bool,
) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        let n = tree.node(id);
        if pred(&n.tag) {
            found.push(id);
        }
        for child in n.children.iter().rev() {
            if let Child::Node(c) = child {
                stack.push(*c);
            }
        }
    }
    found
}

/// Returns every interior node tagged `tag` in the subtree rooted at `node`
/// (including `node` itself), in pre-order.
pub fn find_all_by_tag(tree: &Tree, node: NodeId, tag: &str) -> Vec<NodeId> {
    find_all_matching(tree, node, |t| t == tag)
}

/// Returns the first interior node tagged `tag` in pre-order, if any.
pub fn find_first_by_tag(tree: &Tree, node: NodeId, tag: &str) -> Option<NodeId> {
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        let n = tree.node(id);
        if n.tag == tag {
            return Some(id);
        }
        for child in n.children.iter().rev() {
            if let Child::Node(c) = child {
                stack.push(*c);
            }
        }
    }
    None
}

/// Returns every leaf in the subtree rooted at `node`, in document order.
pub fn collect_leaves(tree: &Tree, node: NodeId) -> Vec<&TreeLeaf> {
    let mut leaves = Vec::new();
    let mut stack = vec![Child::Node(node)];
    while let Some(child) = stack.pop() {
        match child {
            Child::Leaf(id) => leaves.push(tree.leaf(id)),
            Child::Node(id) => stack.extend(tree.node(id).children.iter().rev().copied()),
        }
    }
    leaves
}
