//! Loading of `regscan.toml`: where the syntax tool lives, which files to
//! scan, where results are cached and which grammar tags to walk.
//!
//! Every field has a default matching `verible-verilog-syntax` and its tree
//! vocabulary, so a missing file yields [`ScanConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use types::*;
