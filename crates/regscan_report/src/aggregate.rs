//! Merging per-file analyses into one result.

use std::collections::BTreeMap;

use regscan_analysis::{CandidateRegister, Classification, FileAnalysis, ModuleSummary};

/// Registers and modules gathered from one or more files.
///
/// Only the two sequences are stored; every count and grouping is computed
/// from them on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Candidate registers in file order, then declaration order.
    pub registers: Vec<CandidateRegister>,
    /// Module summaries in file order, then declaration order.
    pub modules: Vec<ModuleSummary>,
}

impl AnalysisResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registers of each classification present.
    pub fn by_type(&self) -> BTreeMap<Classification, usize> {
        let mut counts = BTreeMap::new();
        for reg in &self.registers {
            *counts.entry(reg.classification).or_insert(0) += 1;
        }
        counts
    }

    /// Registers grouped by the name of their module.
    pub fn by_module(&self) -> BTreeMap<&str, Vec<&CandidateRegister>> {
        let mut groups: BTreeMap<&str, Vec<&CandidateRegister>> = BTreeMap::new();
        for reg in &self.registers {
            groups.entry(reg.module.as_str()).or_default().push(reg);
        }
        groups
    }

    /// Sum of the declared widths of all registers.
    pub fn total_bits(&self) -> u64 {
        self.registers
            .iter()
            .fold(0u64, |sum, reg| sum.saturating_add(reg.declared_width))
    }

    /// Number of registers.
    pub fn total_registers(&self) -> usize {
        self.registers.len()
    }

    /// Appends `other` after `self`, keeping both orders.
    pub fn merge(mut self, other: AnalysisResult) -> AnalysisResult {
        self.registers.extend(other.registers);
        self.modules.extend(other.modules);
        self
    }

    /// Merges every result in iteration order.
    pub fn merge_all(results: impl IntoIterator<Item = AnalysisResult>) -> AnalysisResult {
        results.into_iter().fold(AnalysisResult::new(), AnalysisResult::merge)
    }
}

impl From<FileAnalysis> for AnalysisResult {
    fn from(analysis: FileAnalysis) -> Self {
        Self {
            registers: analysis.registers,
            modules: analysis.modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(name: &str, module: &str, width: u64, class: Classification) -> CandidateRegister {
        CandidateRegister {
            name: name.to_string(),
            declared_width: width,
            declaration_line: 1,
            module: module.to_string(),
            file: format!("{module}.sv"),
            classification: class,
        }
    }

    fn result(regs: Vec<CandidateRegister>) -> AnalysisResult {
        AnalysisResult {
            registers: regs,
            modules: Vec::new(),
        }
    }

    #[test]
    fn views_are_derived_from_registers() {
        let r = result(vec![
            reg("q", "a", 8, Classification::FlipFlop),
            reg("l", "a", 1, Classification::Latch),
            reg("s", "b", 4, Classification::FlipFlop),
        ]);
        assert_eq!(r.total_registers(), 3);
        assert_eq!(r.total_bits(), 13);

        let by_type = r.by_type();
        assert_eq!(by_type[&Classification::FlipFlop], 2);
        assert_eq!(by_type[&Classification::Latch], 1);
        assert!(!by_type.contains_key(&Classification::PotentialRegister));

        let by_module = r.by_module();
        assert_eq!(by_module["a"].len(), 2);
        assert_eq!(by_module["b"][0].name, "s");
    }

    #[test]
    fn two_eight_bit_flip_flops() {
        let merged = AnalysisResult::merge_all([
            result(vec![reg("q", "byte_a", 8, Classification::FlipFlop)]),
            result(vec![reg("q", "byte_b", 8, Classification::FlipFlop)]),
        ]);
        assert_eq!(merged.total_registers(), 2);
        assert_eq!(merged.total_bits(), 16);
        assert_eq!(
            merged.by_type(),
            BTreeMap::from([(Classification::FlipFlop, 2)])
        );
    }

    #[test]
    fn merge_is_associative() {
        let a = result(vec![reg("a", "m", 1, Classification::FlipFlop)]);
        let b = result(vec![reg("b", "m", 2, Classification::Latch)]);
        let c = result(vec![reg("c", "n", 3, Classification::FlipFlop)]);

        let left = a.clone().merge(b.clone()).merge(c.clone());
        let right = a.merge(b.merge(c));
        assert_eq!(left, right);
    }

    #[test]
    fn merging_empty_is_a_no_op() {
        let a = result(vec![reg("a", "m", 1, Classification::FlipFlop)]);
        assert_eq!(a.clone().merge(AnalysisResult::new()), a);
        assert_eq!(AnalysisResult::new().merge(a.clone()), a);
    }

    #[test]
    fn merging_with_itself_doubles_counts() {
        let mut r = result(vec![
            reg("q", "a", 8, Classification::FlipFlop),
            reg("l", "a", 1, Classification::Latch),
            reg("s", "b", 4, Classification::FlipFlop),
        ]);
        r.modules = ["a", "b"]
            .into_iter()
            .map(|name| ModuleSummary {
                name: name.to_string(),
                file: format!("{name}.sv"),
                declaration_line: 1,
                register_count: 0,
            })
            .collect();

        let doubled = r.clone().merge(r.clone());
        assert_eq!(doubled.total_registers(), 2 * r.total_registers());
        assert_eq!(doubled.total_bits(), 2 * r.total_bits());
        assert_eq!(doubled.modules.len(), 2 * r.modules.len());
        for (class, count) in r.by_type() {
            assert_eq!(doubled.by_type()[&class], 2 * count);
        }
        assert_eq!(doubled.by_type().len(), r.by_type().len());
        for (module, regs) in r.by_module() {
            assert_eq!(doubled.by_module()[module].len(), 2 * regs.len());
        }
        assert_eq!(doubled.by_module().len(), r.by_module().len());
    }

    #[test]
    fn total_bits_saturates() {
        let r = result(vec![
            reg("a", "m", u64::MAX, Classification::FlipFlop),
            reg("b", "m", 1, Classification::FlipFlop),
        ]);
        assert_eq!(r.total_bits(), u64::MAX);
    }
}
