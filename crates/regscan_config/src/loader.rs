//! Configuration file discovery, loading, and validation.

use crate::error::ConfigError;
use crate::types::ScanConfig;
use std::path::{Path, PathBuf};

/// File name of the configuration file.
pub const CONFIG_FILE: &str = "regscan.toml";

/// Walks up from `start` looking for the nearest `regscan.toml`.
///
/// Returns the path of the file, or `None` if no ancestor has one.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Loads `<dir>/regscan.toml`, or returns the defaults if the file does not exist.
pub fn load_config(dir: &Path) -> Result<ScanConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ScanConfig::default());
    }
    load_config_file(&path)
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ScanConfig, ConfigError> {
    let config: ScanConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required values are present and consistent.
fn validate_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.tool.program.trim().is_empty() {
        return Err(ConfigError::empty("tool.program"));
    }
    if config.tool.timeout_secs == 0 {
        return Err(ConfigError::invalid(
            "tool.timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.scan.extensions.is_empty() {
        return Err(ConfigError::empty("scan.extensions"));
    }
    if let Some(ext) = config.scan.extensions.iter().find(|e| e.starts_with('.')) {
        return Err(ConfigError::invalid(
            "scan.extensions",
            format!("entries are written without a dot, got '{ext}'"),
        ));
    }
    if config.cache.enabled && config.cache.dir.trim().is_empty() {
        return Err(ConfigError::empty("cache.dir"));
    }
    for (name, values) in config.tags.named_fields() {
        if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
            return Err(ConfigError::empty(name));
        }
    }
    Ok(())
}
