//! End-to-end analysis of the Verible-format fixtures under `fixtures/`.

use std::fs;
use std::path::{Path, PathBuf};

use regscan_analysis::{analyze_dump, Classification, FileAnalysis};
use regscan_config::TagConfig;
use regscan_diagnostics::DiagnosticSink;

fn fixture_dir() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().join("fixtures")
}

fn analyze_fixture(name: &str) -> (FileAnalysis, DiagnosticSink) {
    let dir = fixture_dir();
    let source = fs::read(dir.join(name)).unwrap();
    let dump = fs::read_to_string(dir.join(format!("{name}.tree"))).unwrap();
    let sink = DiagnosticSink::new();
    let analysis = analyze_dump(&dump, &source, name, &TagConfig::default(), &sink).unwrap();
    (analysis, sink)
}

#[test]
fn counter_is_one_32_bit_flip_flop() {
    let (analysis, sink) = analyze_fixture("counter.v");

    assert_eq!(analysis.registers.len(), 1);
    let reg = &analysis.registers[0];
    assert_eq!(reg.name, "counter");
    assert_eq!(reg.declared_width, 32);
    assert_eq!(reg.classification, Classification::FlipFlop);
    assert_eq!(reg.module, "counter");
    assert_eq!(reg.file, "counter.v");
    assert_eq!(reg.declaration_line, 4);

    assert_eq!(analysis.modules.len(), 1);
    assert_eq!(analysis.modules[0].register_count, 1);
    assert_eq!(analysis.modules[0].declaration_line, 1);
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn always_latch_target_is_latch() {
    let (analysis, _) = analyze_fixture("latch_demo.sv");

    assert_eq!(analysis.registers.len(), 1);
    let reg = &analysis.registers[0];
    assert_eq!(reg.name, "latch_reg");
    assert_eq!(reg.declared_width, 4);
    assert_eq!(reg.classification, Classification::Latch);
}

#[test]
fn mixed_file_classifies_every_candidate() {
    let (analysis, sink) = analyze_fixture("mixed.sv");

    let summary: Vec<(&str, Classification)> = analysis
        .registers
        .iter()
        .map(|r| (r.name.as_str(), r.classification))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("dout", Classification::FlipFlop),
            ("acc", Classification::FlipFlop),
            ("tmp", Classification::Latch),
            ("flag", Classification::FlipFlop),
            ("mem", Classification::FlipFlop),
        ]
    );

    let modules: Vec<(&str, u32, usize)> = analysis
        .modules
        .iter()
        .map(|m| (m.name.as_str(), m.declaration_line, m.register_count))
        .collect();
    assert_eq!(modules, vec![("shifter", 1, 4), ("spare", 20, 1)]);
    assert!(!sink.has_errors());
}

#[test]
fn no_candidate_is_left_unclassified() {
    for name in ["counter.v", "latch_demo.sv", "mixed.sv", "sensitivity.v"] {
        let (analysis, _) = analyze_fixture(name);
        assert!(analysis
            .registers
            .iter()
            .all(|r| r.classification != Classification::PotentialRegister));
    }
}

#[test]
fn garbage_dump_fails() {
    let sink = DiagnosticSink::new();
    let result = analyze_dump(
        "verible-verilog-syntax: syntax error\n",
        b"",
        "bad.v",
        &TagConfig::default(),
        &sink,
    );
    assert!(result.is_err());
}
