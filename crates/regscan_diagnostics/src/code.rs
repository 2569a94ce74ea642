//! Stable identifiers for every kind of diagnostic.
//!
//! A code is a category letter followed by three digits. The letter fixes
//! the severity: `E` codes fail a file, `W` codes skip part of it, `N` codes
//! record a fallback.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E`: the file could not be analyzed.
    Error,
    /// `W`: part of the file was skipped.
    Warning,
    /// `N`: a documented fallback was applied.
    Note,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }

    /// The category whose prefix is `c`.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            'N' => Some(Category::Note),
            _ => None,
        }
    }

    /// Severity of every diagnostic in this category.
    pub fn severity(self) -> Severity {
        match self {
            Category::Error => Severity::Error,
            Category::Warning => Severity::Warning,
            Category::Note => Severity::Note,
        }
    }
}

/// A category plus a number, displayed as e.g. `E101` or `N301`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// Shorthand for `self.category.severity()`.
    pub fn severity(self) -> Severity {
        self.category.severity()
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

impl FromStr for DiagnosticCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let category = chars
            .next()
            .and_then(Category::from_prefix)
            .ok_or_else(|| format!("unknown diagnostic category in '{s}'"))?;
        let digits = chars.as_str();
        if digits.len() != 3 {
            return Err(format!("diagnostic code '{s}' needs three digits"));
        }
        let number = digits
            .parse()
            .map_err(|_| format!("diagnostic code '{s}' needs three digits"))?;
        Ok(Self::new(category, number))
    }
}

/// Codes emitted by the analysis pipeline.
pub mod codes {
    use super::{Category, DiagnosticCode};

    /// The tree dump did not yield a root node.
    pub const PARSE_FAILURE: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
    /// The syntax tool could not be run or produced no tree.
    pub const TOOL_FAILURE: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
    /// The source file could not be read.
    pub const SOURCE_UNREADABLE: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
    /// A module declaration had no resolvable name and was skipped.
    pub const UNRESOLVED_MODULE_NAME: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);
    /// A packed dimension did not yield two numeric bounds; width is one bit.
    pub const UNRESOLVED_WIDTH: DiagnosticCode = DiagnosticCode::new(Category::Note, 301);
    /// An assignment's left-hand side had no leading identifier and was ignored.
    pub const AMBIGUOUS_ASSIGNMENT_TARGET: DiagnosticCode =
        DiagnosticCode::new(Category::Note, 302);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_padded_display() {
        assert_eq!(codes::PARSE_FAILURE.to_string(), "E101");
        assert_eq!(codes::UNRESOLVED_MODULE_NAME.to_string(), "W201");
        assert_eq!(DiagnosticCode::new(Category::Note, 7).to_string(), "N007");
    }

    #[test]
    fn parses_display_form() {
        assert_eq!("N302".parse::<DiagnosticCode>(), Ok(codes::AMBIGUOUS_ASSIGNMENT_TARGET));
        assert!("X101".parse::<DiagnosticCode>().is_err());
        assert!("E1".parse::<DiagnosticCode>().is_err());
        assert!("Eabc".parse::<DiagnosticCode>().is_err());
    }

    #[test]
    fn category_fixes_severity() {
        assert_eq!(codes::SOURCE_UNREADABLE.severity(), Severity::Error);
        assert_eq!(codes::UNRESOLVED_MODULE_NAME.severity(), Severity::Warning);
        assert_eq!(codes::UNRESOLVED_WIDTH.severity(), Severity::Note);
    }
}
