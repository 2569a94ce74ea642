//! Procedural-block classification of storage elements.
//!
//! Every always-style block is either edge-triggered (its event control
//! names `posedge` or `negedge`) or level-sensitive. The targets assigned in
//! each kind of block are gathered once per module into [`AssignedSignals`],
//! which then decides the role of every candidate.

use std::collections::BTreeSet;

use regscan_config::TagConfig;
use regscan_diagnostics::{codes, Diagnostic};
use regscan_tree::{collect_leaves, find_all_matching, find_first_by_tag, NodeId, Tree};

use crate::model::Classification;
use crate::walk::nodes_matching;
use crate::FileContext;

const EDGE_KEYWORDS: [&str; 2] = ["posedge", "negedge"];

/// Names assigned inside a module's procedural blocks, split by block kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignedSignals {
    /// Targets of assignments in edge-triggered blocks.
    pub clocked: BTreeSet<String>,
    /// Targets of assignments in level-sensitive blocks.
    pub level_sensitive: BTreeSet<String>,
}

impl AssignedSignals {
    /// Classifies a declared name.
    ///
    /// A clocked assignment wins over a level-sensitive one. A name that is
    /// never assigned in a procedural block is a flip-flop.
    pub fn classify(&self, name: &str) -> Classification {
        if self.clocked.contains(name) {
            Classification::FlipFlop
        } else if self.level_sensitive.contains(name) {
            Classification::Latch
        } else {
            Classification::FlipFlop
        }
    }
}

/// Returns `true` if any event control inside `block` contains an edge
/// keyword leaf.
pub fn is_edge_triggered(tree: &Tree, block: NodeId, tags: &TagConfig) -> bool {
    find_all_matching(tree, block, |t| tags.is_event_control(t))
        .into_iter()
        .any(|event| {
            collect_leaves(tree, event)
                .iter()
                .any(|leaf| EDGE_KEYWORDS.contains(&leaf.text.as_str()))
        })
}

/// Returns the name assigned by an assignment statement: the first
/// identifier of its left-hand side.
pub fn assignment_target<'t>(
    tree: &'t Tree,
    assignment: NodeId,
    tags: &TagConfig,
) -> Option<&'t str> {
    let lhs = find_first_by_tag(tree, assignment, &tags.assignment_lhs)?;
    collect_leaves(tree, lhs)
        .into_iter()
        .find(|leaf| tags.is_identifier(&leaf.tag))
        .map(|leaf| leaf.text.as_str())
}

/// Gathers assignment targets from every procedural block of `module`.
///
/// Assignments without a resolvable target are skipped with a `N302` note.
pub(crate) fn assigned_signals(
    tree: &Tree,
    module: NodeId,
    cx: &FileContext<'_>,
) -> AssignedSignals {
    let tags = cx.tags;
    let mut assigned = AssignedSignals::default();
    let blocks = nodes_matching(
        tree,
        module,
        |t| tags.is_procedural_block(t),
        |t| tags.is_module_declaration(t),
    );

    for block in blocks {
        let targets = if is_edge_triggered(tree, block, tags) {
            &mut assigned.clocked
        } else {
            &mut assigned.level_sensitive
        };
        for assignment in find_all_matching(tree, block, |t| tags.is_assignment(t)) {
            match assignment_target(tree, assignment, tags) {
                Some(name) => {
                    targets.insert(name.to_string());
                }
                None => {
                    let mut diag = Diagnostic::note(
                        codes::AMBIGUOUS_ASSIGNMENT_TARGET,
                        "assignment has no identifiable target; ignored",
                    );
                    if let Some(leaf) = collect_leaves(tree, assignment).first() {
                        diag = diag.at_line(cx.line_of(leaf));
                    }
                    cx.emit(diag);
                }
            }
        }
    }
    assigned
}
