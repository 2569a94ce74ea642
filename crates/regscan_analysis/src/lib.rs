//! Storage-element analysis over reconstructed parse trees.
//!
//! For every module in a file this crate finds the `reg`/`logic`
//! declarations, resolves their packed widths, and classifies each one as a
//! flip-flop or a latch from the procedural blocks that assign it.
//!
//! The entry points are [`analyze_dump`], which starts from the syntax
//! tool's text output, and [`analyze_tree`] for an already reconstructed
//! [`Tree`]. Problems that do not stop the analysis (a nameless module, an
//! unresolvable width) are reported through a [`DiagnosticSink`].

#![warn(missing_docs)]

pub mod classify;
pub mod error;
mod extract;
pub mod model;
mod walk;
pub mod width;

pub use classify::{assignment_target, is_edge_triggered, AssignedSignals};
pub use error::UnknownClassification;
pub use model::{CandidateRegister, Classification, FileAnalysis, ModuleSummary};
pub use width::packed_width;

use regscan_common::LineIndex;
use regscan_config::TagConfig;
use regscan_diagnostics::{Diagnostic, DiagnosticSink};
use regscan_tree::{reconstruct, Tree, TreeError, TreeLeaf};

/// Per-file state shared by the extraction passes.
pub(crate) struct FileContext<'a> {
    pub file: &'a str,
    pub lines: &'a LineIndex,
    pub tags: &'a TagConfig,
    pub sink: &'a DiagnosticSink,
}

impl FileContext<'_> {
    fn line_of(&self, leaf: &TreeLeaf) -> u32 {
        self.lines.line_of(leaf.start)
    }

    fn emit(&self, diag: Diagnostic) {
        self.sink.emit(diag.in_file(self.file));
    }
}

/// Reconstructs `dump` and analyzes it.
///
/// `source` holds the raw bytes the dump was produced from; it is only used to
/// turn byte offsets into line numbers and need not be valid UTF-8. Fails only when the dump has no root node.
pub fn analyze_dump(
    dump: &str,
    source: &[u8],
    file: &str,
    tags: &TagConfig,
    sink: &DiagnosticSink,
) -> Result<FileAnalysis, TreeError> {
    let tree = reconstruct(dump)?;
    Ok(analyze_tree(&tree, source, file, tags, sink))
}

/// Extracts and classifies the storage elements of every module in `tree`.
pub fn analyze_tree(
    tree: &Tree,
    source: &[u8],
    file: &str,
    tags: &TagConfig,
    sink: &DiagnosticSink,
) -> FileAnalysis {
    let lines = LineIndex::new(source);
    let cx = FileContext {
        file,
        lines: &lines,
        tags,
        sink,
    };

    let mut analysis = FileAnalysis {
        file: file.to_string(),
        ..FileAnalysis::default()
    };
    for module in extract::module_declarations(tree, &cx) {
        let Some(header) = extract::module_header(tree, module, &cx) else {
            continue;
        };
        let mut registers = extract::candidates(tree, module, &header.name, &cx);
        let assigned = classify::assigned_signals(tree, module, &cx);
        for reg in &mut registers {
            reg.classification = assigned.classify(&reg.name);
        }

        analysis.modules.push(ModuleSummary {
            name: header.name,
            file: file.to_string(),
            declaration_line: header.line,
            register_count: registers.len(),
        });
        analysis.registers.extend(registers);
    }

    tracing::debug!(
        file,
        modules = analysis.modules.len(),
        registers = analysis.registers.len(),
        "analyzed file"
    );
    analysis
}
