//! Result caching for per-file register analyses.
//!
//! Running the syntax tool dominates the cost of analyzing a file, so the
//! finished [`FileAnalysis`] of every file is stored under a fingerprint of
//! the file's bytes and the settings that shaped the analysis. A later run
//! with the same fingerprint skips the tool entirely.
//!
//! [`DiskCache`] keeps a JSON manifest plus one checksummed bincode artifact
//! per file. Every read is fail-safe: a missing, stale or corrupt entry is a
//! miss, never an error.

#![warn(missing_docs)]

pub mod artifact;
pub mod cache;
pub mod error;
pub mod manifest;

pub use cache::DiskCache;
pub use error::CacheError;

use regscan_analysis::FileAnalysis;
use regscan_common::ContentHash;

/// A store of finished analyses keyed by file and fingerprint.
///
/// Implementations are shared across the worker threads of a batch.
pub trait ResultCache: Send + Sync {
    /// Returns the analysis recorded for `file` if it was recorded under the
    /// same `fingerprint`.
    fn get(&self, file: &str, fingerprint: &ContentHash) -> Option<FileAnalysis>;

    /// Records the analysis of `file` under `fingerprint`, replacing any
    /// earlier entry for the file.
    fn set(
        &self,
        file: &str,
        fingerprint: ContentHash,
        analysis: &FileAnalysis,
    ) -> Result<(), CacheError>;
}
