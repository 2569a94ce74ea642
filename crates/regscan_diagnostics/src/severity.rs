//! How much a diagnostic matters to the file it concerns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic, ordered `Note < Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A fallback was applied; shown only in verbose output.
    Note,
    /// Part of a file was skipped but the rest was analyzed.
    Warning,
    /// The file could not be analyzed.
    Error,
}

impl Severity {
    /// Every severity, least severe first.
    pub const ALL: [Severity; 3] = [Severity::Note, Severity::Warning, Severity::Error];

    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Lowercase name used in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// SGR parameters for the colored header.
    pub(crate) fn ansi(self) -> &'static str {
        match self {
            Severity::Note => "1;36",
            Severity::Warning => "1;33",
            Severity::Error => "1;31",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted() {
        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
        assert!(Severity::Note < Severity::Error);
    }

    #[test]
    fn only_error_is_error() {
        let errors: Vec<_> = Severity::ALL.into_iter().filter(|s| s.is_error()).collect();
        assert_eq!(errors, vec![Severity::Error]);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        assert_eq!(Severity::Note.to_string(), "note");
    }

    #[test]
    fn help_is_not_a_severity() {
        assert_eq!(Severity::ALL.len(), 3);
        assert!(serde_json::from_str::<Severity>("\"help\"").is_err());
    }
}
