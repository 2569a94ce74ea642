//! Pruned pre-order walks.
//!
//! The query layer always descends into every subtree. Extraction needs to
//! stop at some boundaries (a nested module, a dimension range) so these
//! variants take a second predicate naming the tags not to enter.

use regscan_tree::{Child, NodeId, Tree, TreeLeaf};

/// Returns the nodes under `node` (including `node`) whose tag satisfies
/// `matches`, without entering children whose tag satisfies `prune`.
pub(crate) fn nodes_matching(
    tree: &Tree,
    node: NodeId,
    matches: impl Fn(&str) -> bool,
    prune: impl Fn(&str) -> bool,
) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack = vec![node];
    while let Some(id) = stack.pop() {
        let n = tree.node(id);
        if matches(&n.tag) {
            found.push(id);
        }
        for child in n.children.iter().rev() {
            if let Child::Node(c) = child {
                if !prune(&tree.node(*c).tag) {
                    stack.push(*c);
                }
            }
        }
    }
    found
}

/// Returns the leaves under `node` in document order, skipping the subtrees
/// of children whose tag satisfies `prune`.
pub(crate) fn leaves_outside<'t>(
    tree: &'t Tree,
    node: NodeId,
    prune: impl Fn(&str) -> bool,
) -> Vec<&'t TreeLeaf> {
    let mut found = Vec::new();
    let mut stack = vec![Child::Node(node)];
    while let Some(child) = stack.pop() {
        match child {
            Child::Leaf(id) => found.push(tree.leaf(id)),
            Child::Node(id) => {
                for c in tree.node(id).children.iter().rev() {
                    match c {
                        Child::Node(n) if prune(&tree.node(*n).tag) => {}
                        _ => stack.push(*c),
                    }
                }
            }
        }
    }
    found
}
