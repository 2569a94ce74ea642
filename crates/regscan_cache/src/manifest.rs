//! The cache manifest: which file was cached under which fingerprint.
//!
//! Stored as `manifest.json` in the cache directory. The recorded version
//! string covers both the regscan version and the settings that shape an
//! analysis; a manifest written under a different version is discarded.

use std::collections::BTreeMap;
use std::path::Path;

use regscan_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Name of the manifest file within the cache directory.
const MANIFEST_FILE: &str = "manifest.json";

/// Top-level cache manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheManifest {
    /// Producer version that wrote this manifest.
    pub version: String,
    /// Per-file entries keyed by the file path as analyzed.
    pub files: BTreeMap<String, FileEntry>,
}

/// The cached state of one analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Fingerprint the analysis was produced under.
    pub fingerprint: ContentHash,
    /// Key of the analysis artifact.
    pub artifact_key: String,
    /// Modules found in the file, for inspection.
    pub modules: Vec<String>,
}

impl CacheManifest {
    /// Creates an empty manifest for the given version.
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            files: BTreeMap::new(),
        }
    }

    /// Loads the manifest from `cache_dir`, or `None` if it is missing or
    /// unreadable.
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(cache_dir.join(MANIFEST_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes the manifest to `cache_dir`, creating the directory if needed.
    pub fn save(&self, cache_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(cache_dir).map_err(|e| CacheError::Io {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;
        let path = cache_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|e| CacheError::Io { path, source: e })
    }

    /// Returns `true` if this manifest was written under `version`.
    pub fn is_compatible(&self, version: &str) -> bool {
        self.version == version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str) -> FileEntry {
        FileEntry {
            fingerprint: ContentHash::from_bytes(key.as_bytes()),
            artifact_key: key.to_string(),
            modules: vec!["top".to_string()],
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = CacheManifest::new("regscan 0.1.0");
        manifest.files.insert("rtl/top.sv".to_string(), entry("abc"));
        manifest.save(dir.path()).unwrap();

        let loaded = CacheManifest::load(dir.path()).unwrap();
        assert_eq!(loaded.version, "regscan 0.1.0");
        assert_eq!(loaded.files["rtl/top.sv"], entry("abc"));
    }

    #[test]
    fn load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CacheManifest::load(dir.path()).is_none());
    }

    #[test]
    fn load_corrupt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert!(CacheManifest::load(dir.path()).is_none());
    }

    #[test]
    fn compatibility_is_exact() {
        let manifest = CacheManifest::new("regscan 0.1.0");
        assert!(manifest.is_compatible("regscan 0.1.0"));
        assert!(!manifest.is_compatible("regscan 0.2.0"));
    }

    #[test]
    fn save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join(".regscan-cache");
        CacheManifest::new("v").save(&nested).unwrap();
        assert!(nested.join(MANIFEST_FILE).exists());
    }
}
