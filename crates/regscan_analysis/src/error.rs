//! Error types for the analysis crate.

use thiserror::Error;

/// A classification name that is not one of `flip_flop`, `latch` or
/// `potential_register`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown register type `{0}` (expected flip_flop, latch or potential_register)")]
pub struct UnknownClassification(pub String);
