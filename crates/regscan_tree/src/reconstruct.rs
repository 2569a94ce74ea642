//! Stack-based reconstruction of a tree from an indented dump.
//!
//! The dump format is the one printed by `verible-verilog-syntax --printtree`:
//!
//! ```text
//! Node @0 (tag: kDescriptionList) {
//!   Node @0 (tag: kModuleDeclaration) {
//!     Node @0 (tag: kModuleHeader) {
//!       Leaf @0 (#"module" @0-6: "module")
//!       Leaf @1 (#SymbolIdentifier @7-10: "top")
//! ```
//!
//! Every two spaces of indentation is one level of depth. Closing braces and
//! any other lines are ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::TreeError;
use crate::ids::NodeId;
use crate::node::{Tree, TreeLeaf};

/// Spaces per indentation level in the dump.
const INDENT_WIDTH: usize = 2;

fn node_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^( *)Node @\d+ \(tag: ([^)\s]+)\)").expect("node line pattern is valid")
    })
}

fn leaf_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^( *)Leaf @\d+ \(#('[^']*'|"[^"]*"|[^\s@]+) @(\d+)-(\d+): "(.*)"\)\s*$"#)
            .expect("leaf line pattern is valid")
    })
}

/// Rebuilds a [`Tree`] from the textual dump printed by the syntax tool.
///
/// Returns [`TreeError::ParseFailure`] when no interior-node line is found.
/// Indentation deeper than the currently open nesting is clamped to the
/// deepest open node, and a second top-level node is attached under the
/// first root so the tree always has exactly one root.
pub fn reconstruct(dump: &str) -> Result<Tree, TreeError> {
    let mut tree: Option<Tree> = None;
    let mut stack: Vec<NodeId> = Vec::new();
    let mut lines = 0usize;
    let mut skipped = 0usize;

    for line in dump.lines() {
        lines += 1;

        if let Some(caps) = node_line().captures(line) {
            let level = caps[1].len() / INDENT_WIDTH;
            let tag = &caps[2];
            match tree.as_mut() {
                None => {
                    let t = Tree::with_root(tag);
                    stack.push(t.root());
                    tree = Some(t);
                }
                Some(t) => {
                    let parent = open_parent(&mut stack, level);
                    let id = t.push_node(parent, tag);
                    stack.push(id);
                }
            }
            continue;
        }

        if let Some(caps) = leaf_line().captures(line) {
            let Some(t) = tree.as_mut() else {
                skipped += 1;
                continue;
            };
            let (Ok(start), Ok(end)) = (caps[3].parse::<u32>(), caps[4].parse::<u32>()) else {
                skipped += 1;
                continue;
            };
            let level = caps[1].len() / INDENT_WIDTH;
            let parent = open_parent(&mut stack, level);
            t.push_leaf(
                parent,
                TreeLeaf {
                    tag: unquote(&caps[2]).to_string(),
                    text: caps[5].to_string(),
                    start,
                    end,
                },
            );
            continue;
        }

        if !line.trim().is_empty() && line.trim() != "}" {
            skipped += 1;
        }
    }

    match tree {
        Some(tree) => {
            tracing::debug!(
                nodes = tree.node_count(),
                leaves = tree.leaf_count(),
                skipped,
                "reconstructed tree"
            );
            Ok(tree)
        }
        None => Err(TreeError::ParseFailure { lines }),
    }
}

/// Pops the open-node stack down to `level` and returns the parent for an
/// element at that level.
///
/// The stack always holds the root once a tree exists, so `level` is clamped
/// to `1..=stack.len()`.
fn open_parent(stack: &mut Vec<NodeId>, level: usize) -> NodeId {
    let level = level.clamp(1, stack.len());
    stack.truncate(level);
    stack[level - 1]
}

/// Strips one pair of surrounding single or double quotes from a leaf tag.
fn unquote(tag: &str) -> &str {
    let bytes = tag.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &tag[1..tag.len() - 1]
    } else {
        tag
    }
}
