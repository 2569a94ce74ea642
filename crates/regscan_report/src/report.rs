//! The serializable register report and its text rendering.

use std::collections::BTreeMap;
use std::fmt::Write;

use regscan_analysis::{CandidateRegister, Classification, ModuleSummary};
use serde::Serialize;

use crate::aggregate::AnalysisResult;
use crate::batch::FileFailure;

/// Restricts a report to one module and/or one classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Keep only registers and modules with this module name.
    pub module: Option<String>,
    /// Keep only registers with this classification.
    pub classification: Option<Classification>,
}

impl ReportFilter {
    fn keeps_register(&self, reg: &CandidateRegister) -> bool {
        self.module.as_ref().map_or(true, |m| reg.module == *m)
            && self.classification.map_or(true, |c| reg.classification == c)
    }

    fn keeps_module(&self, module: &ModuleSummary) -> bool {
        self.module.as_ref().map_or(true, |m| module.name == *m)
    }
}

/// A snapshot of an [`AnalysisResult`] ready for output.
///
/// Counts are computed from the registers that pass the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReport {
    /// Number of registers listed.
    pub total_registers: usize,
    /// Sum of the listed registers' widths.
    pub total_bits: u64,
    /// Listed registers per classification.
    pub by_type: BTreeMap<Classification, usize>,
    /// Listed registers per module name.
    pub by_module: BTreeMap<String, Vec<CandidateRegister>>,
    /// Listed registers in file and declaration order.
    pub registers: Vec<CandidateRegister>,
    /// Listed modules in file and declaration order.
    pub modules: Vec<ModuleSummary>,
    /// Files that could not be analyzed.
    pub failures: Vec<FileFailure>,
}

impl RegisterReport {
    /// Builds a report from `result`, keeping what `filter` allows.
    pub fn new(result: &AnalysisResult, failures: &[FileFailure], filter: &ReportFilter) -> Self {
        let filtered = AnalysisResult {
            registers: result
                .registers
                .iter()
                .filter(|r| filter.keeps_register(r))
                .cloned()
                .collect(),
            modules: result
                .modules
                .iter()
                .filter(|m| filter.keeps_module(m))
                .cloned()
                .collect(),
        };

        Self {
            total_registers: filtered.total_registers(),
            total_bits: filtered.total_bits(),
            by_type: filtered.by_type(),
            by_module: filtered
                .by_module()
                .into_iter()
                .map(|(name, regs)| (name.to_string(), regs.into_iter().cloned().collect()))
                .collect(),
            registers: filtered.registers,
            modules: filtered.modules,
            failures: failures.to_vec(),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the report as an aligned table followed by a summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if !self.registers.is_empty() {
            let headers = ["MODULE", "REGISTER", "WIDTH", "TYPE", "LOCATION"];
            let rows: Vec<[String; 5]> = self
                .registers
                .iter()
                .map(|r| {
                    [
                        r.module.clone(),
                        r.name.clone(),
                        r.declared_width.to_string(),
                        r.classification.to_string(),
                        format!("{}:{}", r.file, r.declaration_line),
                    ]
                })
                .collect();

            let mut widths = headers.map(str::len);
            for row in &rows {
                for (w, cell) in widths.iter_mut().zip(row) {
                    *w = (*w).max(cell.len());
                }
            }

            push_row(&mut out, &headers, &widths);
            for row in &rows {
                let cells: Vec<&str> = row.iter().map(String::as_str).collect();
                push_row(&mut out, &cells, &widths);
            }
            out.push('\n');
        }

        let types: Vec<String> = self
            .by_type
            .iter()
            .map(|(class, count)| format!("{class}: {count}"))
            .collect();
        let _ = write!(
            out,
            "{} register(s), {} bit(s)",
            self.total_registers, self.total_bits
        );
        if !types.is_empty() {
            let _ = write!(out, " ({})", types.join(", "));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{} module(s)", self.modules.len());

        if !self.failures.is_empty() {
            let _ = writeln!(out, "{} file(s) failed:", self.failures.len());
            for failure in &self.failures {
                let _ = writeln!(
                    out,
                    "  {}: [{}] {}",
                    failure.file, failure.code, failure.message
                );
            }
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
        } else if i == 2 {
            let _ = write!(out, "{cell:>width$}  ");
        } else {
            let _ = write!(out, "{cell:<width$}  ");
        }
    }
    out.push('\n');
}
