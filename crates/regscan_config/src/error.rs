//! Errors raised while loading `regscan.toml`.

use std::path::PathBuf;

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The content is not valid TOML or does not match the schema.
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// A value that must be set is empty.
    #[error("`{field}` must not be empty")]
    Empty {
        /// Dotted key of the value, e.g. `tool.program`.
        field: String,
    },

    /// A value is present but unusable.
    #[error("`{field}` {reason}")]
    Invalid {
        /// Dotted key of the value.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn empty(field: &str) -> Self {
        Self::Empty {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Dotted key of the offending value, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Empty { field } | Self::Invalid { field, .. } => Some(field),
            Self::Read { .. } | Self::Parse(_) => None,
        }
    }
}
