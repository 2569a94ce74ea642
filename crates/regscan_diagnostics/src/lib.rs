//! Per-file diagnostics: codes, severities, collection and rendering.
//!
//! A failed tool run, a module without a name or a width that fell back to
//! one bit each becomes a [`Diagnostic`]. A [`DiagnosticSink`] collects them
//! across worker threads and [`TerminalRenderer`] prints them for the CLI.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{codes, Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
