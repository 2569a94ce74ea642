//! Structured diagnostic messages with severity, codes, and locations.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A structured diagnostic message.
///
/// Each diagnostic carries a severity and code, a primary message, the file
/// (and line, when known) it concerns, and optional notes and help text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The analyzed file the diagnostic concerns.
    pub file: Option<PathBuf>,
    /// The 1-based source line, when the problem has a location.
    pub line: Option<u32>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Actionable suggestions.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            file: None,
            line: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a diagnostic with the severity implied by `code`'s category.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(code.severity(), code, message)
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    /// Creates a new note diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message)
    }

    /// Sets the file this diagnostic concerns.
    pub fn in_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Sets the source line this diagnostic points at.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::codes;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(codes::PARSE_FAILURE, "no root node");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "no root node");
        assert_eq!(diag.code.to_string(), "E101");
        assert!(diag.file.is_none());
    }

    #[test]
    fn severity_from_code() {
        let diag = Diagnostic::new(codes::UNRESOLVED_MODULE_NAME, "module skipped");
        assert_eq!(diag.severity, Severity::Warning);
    }

    #[test]
    fn create_note() {
        let diag = Diagnostic::note(codes::UNRESOLVED_WIDTH, "width defaults to 1");
        assert_eq!(diag.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(codes::UNRESOLVED_MODULE_NAME, "module skipped")
            .in_file("rtl/top.sv")
            .at_line(12)
            .with_note("no identifier found in the module header")
            .with_help("check that the tool was run with --printtree");
        assert_eq!(diag.file.as_deref(), Some(Path::new("rtl/top.sv")));
        assert_eq!(diag.line, Some(12));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }
}
