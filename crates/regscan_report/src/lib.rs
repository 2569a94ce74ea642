//! Batch analysis and reporting of storage elements across source files.
//!
//! [`BatchAnalyzer`] runs the syntax tool over every discovered file,
//! analyzes each dump in parallel and merges the per-file results into one
//! [`AnalysisResult`]. A [`RegisterReport`] then renders that result as a
//! text table or as JSON.

#![warn(missing_docs)]

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod report;
pub mod tool;

pub use aggregate::AnalysisResult;
pub use batch::{discover_source_files, BatchAnalyzer, BatchOutcome, FileFailure};
pub use error::ToolError;
pub use report::{RegisterReport, ReportFilter};
pub use tool::{CommandTool, SavedDump, SyntaxTool, ToolOutput};
