//! Result records produced by analyzing one file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownClassification;

/// The role a storage element plays in its module.
///
/// Ordered so that it can key sorted maps in reports.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Assigned inside an edge-triggered block, or never assigned at all.
    FlipFlop,
    /// Assigned only inside level-sensitive blocks.
    Latch,
    /// Declared but not yet classified.
    PotentialRegister,
}

impl Classification {
    /// Every classification, in report order.
    pub const ALL: [Classification; 3] = [
        Classification::FlipFlop,
        Classification::Latch,
        Classification::PotentialRegister,
    ];

    /// Returns the snake_case name used in reports and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::FlipFlop => "flip_flop",
            Classification::Latch => "latch",
            Classification::PotentialRegister => "potential_register",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = UnknownClassification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownClassification(s.to_string()))
    }
}

/// A declared storage element and its resolved role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRegister {
    /// Declared signal name.
    pub name: String,
    /// Bit width resolved from the packed dimension; at least 1.
    pub declared_width: u64,
    /// 1-based line of the declared name.
    pub declaration_line: u32,
    /// Name of the enclosing module.
    pub module: String,
    /// The analyzed file, as given on the command line.
    pub file: String,
    /// Role assigned by the classifier.
    pub classification: Classification,
}

/// A module declaration found in a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    /// Module name.
    pub name: String,
    /// The file declaring the module.
    pub file: String,
    /// 1-based line of the module's first token.
    pub declaration_line: u32,
    /// Number of candidate registers declared in the module.
    pub register_count: usize,
}

/// Everything extracted from one file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// The analyzed file.
    pub file: String,
    /// Modules in declaration order.
    pub modules: Vec<ModuleSummary>,
    /// Candidate registers in declaration order.
    pub registers: Vec<CandidateRegister>,
}
