//! Module and storage-element discovery.
//!
//! Walks each module declaration for data and port declarations and turns
//! every `reg`/`logic` declarator into a [`CandidateRegister`] with its
//! resolved width and declaration line.

use regscan_diagnostics::{codes, Diagnostic};
use regscan_tree::{collect_leaves, find_all_matching, find_first_by_tag, NodeId, Tree, TreeLeaf};

use crate::model::{CandidateRegister, Classification};
use crate::walk::{leaves_outside, nodes_matching};
use crate::width::packed_width;
use crate::FileContext;

/// Keyword leaf tags that name a storage kind, in the order they are checked.
const STORAGE_KEYWORDS: [&str; 3] = ["wire", "reg", "logic"];

/// Storage kind assumed when a declaration names none.
const DEFAULT_STORAGE: &str = "wire";

const OUTPUT_KEYWORD: &str = "output";

/// A module declaration whose name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModuleHeader {
    pub name: String,
    pub line: u32,
}

/// Returns every module declaration node in the tree, in pre-order.
pub(crate) fn module_declarations(tree: &Tree, cx: &FileContext<'_>) -> Vec<NodeId> {
    find_all_matching(tree, tree.root(), |t| cx.tags.is_module_declaration(t))
}

/// Resolves a module's name and line.
///
/// The name is the first identifier of the header that is not the module
/// keyword. Returns `None` and emits `W201` when there is none.
pub(crate) fn module_header(
    tree: &Tree,
    module: NodeId,
    cx: &FileContext<'_>,
) -> Option<ModuleHeader> {
    let first_leaf = collect_leaves(tree, module).first().copied();
    let name = find_first_by_tag(tree, module, &cx.tags.module_header).and_then(|header| {
        collect_leaves(tree, header).into_iter().find(|leaf| {
            cx.tags.is_identifier(&leaf.tag) && leaf.text != cx.tags.module_keyword
        })
    });

    match name {
        Some(name) => Some(ModuleHeader {
            name: name.text.clone(),
            line: cx.line_of(first_leaf.unwrap_or(name)),
        }),
        None => {
            let mut diag = Diagnostic::warning(
                codes::UNRESOLVED_MODULE_NAME,
                "module declaration has no resolvable name; skipped",
            )
            .with_note("no identifier found in the module header");
            if let Some(leaf) = first_leaf {
                diag = diag.at_line(cx.line_of(leaf));
            }
            cx.emit(diag);
            None
        }
    }
}

/// Extracts the candidate registers declared directly in `module`, in
/// declaration order. Nested module declarations are not entered.
pub(crate) fn candidates(
    tree: &Tree,
    module: NodeId,
    module_name: &str,
    cx: &FileContext<'_>,
) -> Vec<CandidateRegister> {
    let tags = cx.tags;
    let declarations = nodes_matching(
        tree,
        module,
        |t| tags.is_data_declaration(t) || tags.is_port_declaration(t),
        |t| tags.is_module_declaration(t),
    );

    let mut found = Vec::new();
    for decl in declarations {
        let names = if tags.is_port_declaration(&tree.node(decl).tag) {
            port_names(tree, decl, cx)
        } else {
            data_names(tree, decl, cx)
        };
        if names.is_empty() {
            continue;
        }
        let width = declared_width(tree, decl, cx);
        found.extend(names.into_iter().map(|leaf| CandidateRegister {
            name: leaf.text.clone(),
            declared_width: width,
            declaration_line: cx.line_of(leaf),
            module: module_name.to_string(),
            file: cx.file.to_string(),
            classification: Classification::PotentialRegister,
        }));
    }
    found
}

/// Returns the storage kind of a declaration: the first `wire`, `reg` or
/// `logic` keyword among its leaves, `wire` if there is none.
pub(crate) fn storage_kind<'t>(leaves: &[&'t TreeLeaf]) -> &'t str {
    leaves
        .iter()
        .copied()
        .find(|leaf| STORAGE_KEYWORDS.contains(&leaf.tag.as_str()))
        .map_or(DEFAULT_STORAGE, |leaf| leaf.tag.as_str())
}

fn is_storage(kind: &str) -> bool {
    kind == "reg" || kind == "logic"
}

/// Name leaves of a data declaration: the first identifier of each
/// variable declarator, if the declaration is `reg` or `logic`.
fn data_names<'t>(tree: &'t Tree, decl: NodeId, cx: &FileContext<'_>) -> Vec<&'t TreeLeaf> {
    if !is_storage(storage_kind(&collect_leaves(tree, decl))) {
        return Vec::new();
    }
    find_all_matching(tree, decl, |t| cx.tags.is_variable_declarator(t))
        .into_iter()
        .filter_map(|declarator| {
            collect_leaves(tree, declarator)
                .into_iter()
                .find(|leaf| cx.tags.is_identifier(&leaf.tag))
        })
        .collect()
}

/// Name leaves of a port declaration: every identifier outside dimension
/// subtrees, if the port is an `output` typed `reg` or `logic`.
fn port_names<'t>(tree: &'t Tree, decl: NodeId, cx: &FileContext<'_>) -> Vec<&'t TreeLeaf> {
    let leaves = collect_leaves(tree, decl);
    let is_output = leaves.iter().any(|leaf| leaf.tag == OUTPUT_KEYWORD);
    if !is_output || !is_storage(storage_kind(&leaves)) {
        return Vec::new();
    }
    leaves_outside(tree, decl, |t| cx.tags.is_dimension(t))
        .into_iter()
        .filter(|leaf| cx.tags.is_identifier(&leaf.tag))
        .collect()
}

/// Width of a declaration's packed dimension, 1 when it has none.
///
/// A packed dimension whose bounds do not resolve also yields 1 and a
/// `N301` note.
fn declared_width(tree: &Tree, decl: NodeId, cx: &FileContext<'_>) -> u64 {
    let Some(dims) = find_first_by_tag(tree, decl, &cx.tags.packed_dimensions) else {
        return 1;
    };
    packed_width(tree, dims, cx.tags).unwrap_or_else(|| {
        let text: String = collect_leaves(tree, dims)
            .iter()
            .map(|leaf| leaf.text.as_str())
            .collect();
        let mut diag = Diagnostic::note(
            codes::UNRESOLVED_WIDTH,
            format!("width of `{text}` does not resolve to two numeric bounds; using 1"),
        );
        if let Some(leaf) = collect_leaves(tree, dims).first() {
            diag = diag.at_line(cx.line_of(leaf));
        }
        cx.emit(diag);
        1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use regscan_common::LineIndex;
    use regscan_config::TagConfig;
    use regscan_diagnostics::{DiagnosticSink, Severity};
    use regscan_tree::reconstruct;

    const PORTS_SRC: &str = include_str!("../../../fixtures/ports.sv");
    const PORTS_TREE: &str = include_str!("../../../fixtures/ports.sv.tree");
    const NAMELESS_SRC: &str = include_str!("../../../fixtures/nameless.v");
    const NAMELESS_TREE: &str = include_str!("../../../fixtures/nameless.v.tree");
    const MIXED_SRC: &str = include_str!("../../../fixtures/mixed.sv");
    const MIXED_TREE: &str = include_str!("../../../fixtures/mixed.sv.tree");

    fn leaf(tag: &str) -> TreeLeaf {
        TreeLeaf {
            tag: tag.to_string(),
            text: tag.to_string(),
            start: 0,
            end: 0,
        }
    }

    fn extract_all(src: &str, dump: &str, sink: &DiagnosticSink) -> Vec<CandidateRegister> {
        let tree = reconstruct(dump).unwrap();
        let lines = LineIndex::new(src);
        let tags = TagConfig::default();
        let cx = FileContext {
            file: "test.sv",
            lines: &lines,
            tags: &tags,
            sink,
        };
        let mut all = Vec::new();
        for module in module_declarations(&tree, &cx) {
            if let Some(header) = module_header(&tree, module, &cx) {
                all.extend(candidates(&tree, module, &header.name, &cx));
            }
        }
        all
    }

    #[test]
    fn storage_kind_takes_first_keyword() {
        let (reg, logic, output) = (leaf("reg"), leaf("logic"), leaf("output"));
        assert_eq!(storage_kind(&[&output, &reg, &logic]), "reg");
        assert_eq!(storage_kind(&[&output]), "wire");
        assert_eq!(storage_kind(&[]), "wire");
    }

    #[test]
    fn only_typed_output_ports_are_candidates() {
        let sink = DiagnosticSink::new();
        let regs = extract_all(PORTS_SRC, PORTS_TREE, &sink);
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].name, "q");
        assert_eq!(regs[0].declared_width, 4);
        assert_eq!(regs[0].declaration_line, 2);
        assert_eq!(regs[0].module, "ports");
        assert_eq!(regs[0].classification, Classification::PotentialRegister);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn nameless_module_is_skipped_with_warning() {
        let sink = DiagnosticSink::new();
        let regs = extract_all(NAMELESS_SRC, NAMELESS_TREE, &sink);

        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].module, "named");
        assert_eq!(regs[0].name, "x");

        let diags = sink.take_all();
        let warning = diags
            .iter()
            .find(|d| d.code == codes::UNRESOLVED_MODULE_NAME)
            .expect("W201 emitted");
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.line, Some(1));
        assert_eq!(warning.file.as_deref(), Some(std::path::Path::new("test.sv")));
    }

    #[test]
    fn unresolved_width_defaults_to_one_with_note() {
        let sink = DiagnosticSink::new();
        let regs = extract_all(NAMELESS_SRC, NAMELESS_TREE, &sink);
        assert_eq!(regs[0].declared_width, 1);

        let note = sink
            .diagnostics()
            .into_iter()
            .find(|d| d.code == codes::UNRESOLVED_WIDTH)
            .expect("N301 emitted");
        assert_eq!(note.severity, Severity::Note);
        assert_eq!(note.line, Some(4));
        assert!(note.message.contains("[N:0]"));
    }

    #[test]
    fn candidates_follow_declaration_order() {
        let sink = DiagnosticSink::new();
        let regs = extract_all(MIXED_SRC, MIXED_TREE, &sink);
        let summary: Vec<(&str, u64, u32, &str)> = regs
            .iter()
            .map(|r| (r.name.as_str(), r.declared_width, r.declaration_line, r.module.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("dout", 8, 4, "shifter"),
                ("acc", 32, 8, "shifter"),
                ("tmp", 32, 8, "shifter"),
                ("flag", 1, 9, "shifter"),
                ("mem", 8, 21, "spare"),
            ]
        );
    }
}
