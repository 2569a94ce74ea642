//! Error types for tree reconstruction.

/// Errors that can occur while reconstructing a tree from a dump.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// The dump contained no interior-node line, so no root could be established.
    #[error("tree dump did not yield a root node ({lines} line(s) read)")]
    ParseFailure {
        /// Number of input lines that were examined.
        lines: usize,
    },
}
