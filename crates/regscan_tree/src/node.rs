//! Tree elements and the arena-backed [`Tree`] that owns them.

use std::fmt;

use crate::arena::Arena;
use crate::ids::{LeafId, NodeId};

/// An interior node: a grammar tag and its ordered children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// The node's grammar tag, e.g. `kModuleDeclaration`.
    pub tag: String,
    /// Children in dump order.
    pub children: Vec<Child>,
}

/// A leaf: a token tag, its verbatim source text, and its byte span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeLeaf {
    /// The token tag with surrounding quotes removed, e.g. `SymbolIdentifier`
    /// or `reg`.
    pub tag: String,
    /// The token's verbatim source text.
    pub text: String,
    /// Byte offset of the token start (inclusive).
    pub start: u32,
    /// Byte offset of the token end (exclusive).
    pub end: u32,
}

/// A reference from a node to one of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Child {
    /// An interior child node.
    Node(NodeId),
    /// A leaf child.
    Leaf(LeafId),
}

/// A reconstructed parse tree for a single file.
///
/// Nodes and leaves are stored in separate arenas; a node refers to its
/// children by ID and nothing refers back to a parent.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Arena<NodeId, TreeNode>,
    leaves: Arena<LeafId, TreeLeaf>,
    root: NodeId,
}

impl Tree {
    /// Creates a tree holding only a root node with the given tag.
    pub fn with_root(tag: impl Into<String>) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(TreeNode {
            tag: tag.into(),
            children: Vec::new(),
        });
        Self {
            nodes,
            leaves: Arena::new(),
            root,
        }
    }

    /// Returns the root node ID.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node with the given ID.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Returns the leaf with the given ID.
    pub fn leaf(&self, id: LeafId) -> &TreeLeaf {
        &self.leaves[id]
    }

    /// Appends a new interior node under `parent` and returns its ID.
    pub fn push_node(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let id = self.nodes.alloc(TreeNode {
            tag: tag.into(),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(Child::Node(id));
        id
    }

    /// Appends a new leaf under `parent` and returns its ID.
    pub fn push_leaf(&mut self, parent: NodeId, leaf: TreeLeaf) -> LeafId {
        let id = self.leaves.alloc(leaf);
        self.nodes[parent].children.push(Child::Leaf(id));
        id
    }

    /// Returns the number of interior nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }
}

impl fmt::Display for Tree {
    /// Prints the tree as indented tags, one element per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(Child::Node(self.root), 0usize)];
        while let Some((child, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match child {
                Child::Node(id) => {
                    let node = self.node(id);
                    writeln!(f, "{indent}{}", node.tag)?;
                    for c in node.children.iter().rev() {
                        stack.push((*c, depth + 1));
                    }
                }
                Child::Leaf(id) => {
                    let leaf = self.leaf(id);
                    writeln!(
                        f,
                        "{indent}{} @{}-{}: {:?}",
                        leaf.tag, leaf.start, leaf.end, leaf.text
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str, start: u32) -> TreeLeaf {
        TreeLeaf {
            tag: tag.to_string(),
            text: text.to_string(),
            start,
            end: start + text.len() as u32,
        }
    }

    #[test]
    fn build_small_tree() {
        let mut tree = Tree::with_root("kDescriptionList");
        let module = tree.push_node(tree.root(), "kModuleDeclaration");
        tree.push_leaf(module, leaf("module", "module", 0));
        tree.push_leaf(module, leaf("SymbolIdentifier", "top", 7));

        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.node(tree.root()).children, vec![Child::Node(module)]);
        assert_eq!(tree.node(module).children.len(), 2);
    }

    #[test]
    fn display_indents_by_depth() {
        let mut tree = Tree::with_root("kDescriptionList");
        let module = tree.push_node(tree.root(), "kModuleDeclaration");
        tree.push_leaf(module, leaf("module", "module", 0));

        let text = tree.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "kDescriptionList");
        assert_eq!(lines[1], "  kModuleDeclaration");
        assert_eq!(lines[2], "    module @0-6: \"module\"");
    }
}
