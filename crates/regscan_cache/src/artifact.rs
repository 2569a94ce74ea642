//! Checksummed binary artifacts holding one file's analysis each.
//!
//! Every artifact is `<cache_dir>/analyses/<key>.bin`: a little-endian `u32`
//! header length, a bincode [`ArtifactHeader`], then the bincode-encoded
//! [`FileAnalysis`]. The header's checksum covers the payload.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regscan_analysis::FileAnalysis;
use regscan_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Magic bytes identifying a regscan cache artifact.
const ARTIFACT_MAGIC: [u8; 4] = *b"RSCN";

/// Current artifact format version.
const ARTIFACT_FORMAT_VERSION: u32 = 1;

const ARTIFACT_DIR: &str = "analyses";
const ARTIFACT_EXT: &str = "bin";

/// Header prepended to every artifact for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    /// Magic bytes: must be `b"RSCN"`.
    pub magic: [u8; 4],
    /// Artifact format version.
    pub format_version: u32,
    /// Version string of the producer (regscan version and tool settings).
    pub producer: String,
    /// Fingerprint of the payload bytes.
    pub checksum: ContentHash,
}

/// Reads and writes analysis artifacts under the cache directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at `cache_dir`.
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            dir: cache_dir.join(ARTIFACT_DIR),
        }
    }

    /// Returns the file path of the artifact with the given key.
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{ARTIFACT_EXT}"))
    }

    /// Serializes `analysis` and writes it under `key`.
    pub fn write(
        &self,
        key: &str,
        analysis: &FileAnalysis,
        producer: &str,
    ) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let payload = encode(analysis)?;
        let header = ArtifactHeader {
            magic: ARTIFACT_MAGIC,
            format_version: ARTIFACT_FORMAT_VERSION,
            producer: producer.to_string(),
            checksum: ContentHash::from_bytes(&payload),
        };
        let header_bytes = encode(&header)?;

        let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
        output.extend_from_slice(&(header_bytes.len() as u32).to_le_bytes());
        output.extend_from_slice(&header_bytes);
        output.extend_from_slice(&payload);

        let path = self.artifact_path(key);
        std::fs::write(&path, &output).map_err(|e| CacheError::Io { path, source: e })
    }

    /// Reads the artifact stored under `key`.
    ///
    /// Returns `None` if the file is missing, truncated, has the wrong magic
    /// or format version, or fails its checksum.
    pub fn read(&self, key: &str) -> Option<FileAnalysis> {
        let raw = std::fs::read(self.artifact_path(key)).ok()?;
        let header_len = u32::from_le_bytes(raw.get(..4)?.try_into().ok()?) as usize;
        let header_end = 4usize.checked_add(header_len)?;
        let header: ArtifactHeader = decode(raw.get(4..header_end)?)?;

        if header.magic != ARTIFACT_MAGIC || header.format_version != ARTIFACT_FORMAT_VERSION {
            return None;
        }
        let payload = &raw[header_end..];
        if ContentHash::from_bytes(payload) != header.checksum {
            return None;
        }
        decode(payload)
    }

    /// Deletes every artifact whose key is not in `live`. Returns the number
    /// of files removed.
    pub fn remove_unlisted(&self, live: &BTreeSet<&str>) -> Result<usize, CacheError> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let io_err = |e: std::io::Error| CacheError::Io {
            path: self.dir.clone(),
            source: e,
        };

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !live.contains(stem) {
                std::fs::remove_file(&path).map_err(|e| CacheError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CacheError> {
    bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(|e| {
        CacheError::Serialization {
            reason: e.to_string(),
        }
    })
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .ok()
        .map(|(value, _)| value)
}
