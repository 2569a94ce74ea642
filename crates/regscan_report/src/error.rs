//! Error types for running the external syntax tool.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while running the syntax tool on one file.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The tool did not exit before the deadline and was killed.
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout {
        /// The program that was invoked.
        program: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Waiting on the running tool failed.
    #[error("lost track of `{program}`: {source}")]
    Wait {
        /// The program that was invoked.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A saved tree dump could not be read.
    #[error("failed to read tree dump {path}: {source}")]
    DumpUnreadable {
        /// The dump file.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
