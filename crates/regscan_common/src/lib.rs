//! Shared foundational types used across the regscan workspace.
//!
//! This crate provides content fingerprints for cache invalidation and a
//! line index for turning byte offsets reported by the syntax tool into
//! 1-based line numbers.

#![warn(missing_docs)]

pub mod hash;
pub mod line_index;

pub use hash::{ContentHash, InvalidHash};
pub use line_index::LineIndex;
