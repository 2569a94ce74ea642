//! The on-disk [`ResultCache`] implementation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use regscan_analysis::FileAnalysis;
use regscan_common::ContentHash;

use crate::artifact::ArtifactStore;
use crate::error::CacheError;
use crate::manifest::{CacheManifest, FileEntry};
use crate::ResultCache;

/// A directory-backed cache of file analyses.
///
/// Lookups and insertions go through a mutex-guarded manifest, so one cache
/// can serve every worker of a batch. Changes reach disk on [`save`].
///
/// [`save`]: DiskCache::save
pub struct DiskCache {
    cache_dir: PathBuf,
    version: String,
    store: ArtifactStore,
    manifest: Mutex<CacheManifest>,
}

impl DiskCache {
    /// Opens the cache in `cache_dir`.
    ///
    /// An existing manifest is reused only if it was written under the same
    /// `version`; otherwise the cache starts empty.
    pub fn open(cache_dir: &Path, version: &str) -> Self {
        let manifest = CacheManifest::load(cache_dir)
            .filter(|m| m.is_compatible(version))
            .unwrap_or_else(|| CacheManifest::new(version));
        Self {
            cache_dir: cache_dir.to_path_buf(),
            version: version.to_string(),
            store: ArtifactStore::new(cache_dir),
            manifest: Mutex::new(manifest),
        }
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the number of files with a cached analysis.
    pub fn len(&self) -> usize {
        self.lock().files.len()
    }

    /// Returns `true` if no file has a cached analysis.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the manifest and deletes artifacts it no longer references.
    ///
    /// Entries for files that no longer exist are dropped first, so a deleted
    /// or renamed source stops holding on to its artifact.
    pub fn save(&self) -> Result<(), CacheError> {
        let mut manifest = self.lock();
        let before = manifest.files.len();
        manifest.files.retain(|file, _| Path::new(file).exists());
        let pruned = before - manifest.files.len();
        manifest.save(&self.cache_dir)?;
        let live: BTreeSet<&str> = manifest
            .files
            .values()
            .map(|entry| entry.artifact_key.as_str())
            .collect();
        let removed = self.store.remove_unlisted(&live)?;
        tracing::debug!(
            dir = %self.cache_dir.display(),
            entries = manifest.files.len(),
            pruned,
            removed,
            "saved cache"
        );
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheManifest> {
        self.manifest.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Artifacts are named by file and fingerprint, so two files with identical
/// bytes never share an artifact.
fn artifact_key(file: &str, fingerprint: &ContentHash) -> String {
    let fingerprint = fingerprint.to_string();
    ContentHash::from_parts([file.as_bytes(), fingerprint.as_bytes()]).to_string()
}

impl ResultCache for DiskCache {
    fn get(&self, file: &str, fingerprint: &ContentHash) -> Option<FileAnalysis> {
        let key = {
            let manifest = self.lock();
            let entry = manifest.files.get(file)?;
            if entry.fingerprint != *fingerprint {
                return None;
            }
            entry.artifact_key.clone()
        };
        self.store.read(&key)
    }

    fn set(
        &self,
        file: &str,
        fingerprint: ContentHash,
        analysis: &FileAnalysis,
    ) -> Result<(), CacheError> {
        let key = artifact_key(file, &fingerprint);
        self.store.write(&key, analysis, &self.version)?;
        self.lock().files.insert(
            file.to_string(),
            FileEntry {
                fingerprint,
                artifact_key: key,
                modules: analysis.modules.iter().map(|m| m.name.clone()).collect(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regscan_analysis::ModuleSummary;

    fn source_file(dir: &Path, name: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, b"module top; endmodule\n").unwrap();
        path.display().to_string()
    }

    fn analysis(file: &str) -> FileAnalysis {
        FileAnalysis {
            file: file.to_string(),
            modules: vec![ModuleSummary {
                name: "top".to_string(),
                file: file.to_string(),
                declaration_line: 1,
                register_count: 0,
            }],
            registers: Vec::new(),
        }
    }

    #[test]
    fn hit_after_set() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), "v1");
        let fp = ContentHash::from_bytes(b"module top; endmodule");

        assert!(cache.get("top.sv", &fp).is_none());
        cache.set("top.sv", fp, &analysis("top.sv")).unwrap();
        assert_eq!(cache.get("top.sv", &fp), Some(analysis("top.sv")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_fingerprint_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), "v1");
        let old = ContentHash::from_bytes(b"reg a;");
        let new = ContentHash::from_bytes(b"reg b;");

        cache.set("top.sv", old, &analysis("top.sv")).unwrap();
        assert!(cache.get("top.sv", &new).is_none());
        assert!(cache.get("other.sv", &old).is_none());
    }

    #[test]
    fn persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let file = source_file(dir.path(), "a.v");
        let fp = ContentHash::from_bytes(b"source");
        {
            let cache = DiskCache::open(dir.path(), "v1");
            cache.set(&file, fp, &analysis(&file)).unwrap();
            cache.save().unwrap();
        }
        let cache = DiskCache::open(dir.path(), "v1");
        assert_eq!(cache.get(&file, &fp), Some(analysis(&file)));
    }

    #[test]
    fn version_change_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let fp = ContentHash::from_bytes(b"source");
        {
            let cache = DiskCache::open(dir.path(), "v1");
            cache.set("a.v", fp, &analysis("a.v")).unwrap();
            cache.save().unwrap();
        }
        let cache = DiskCache::open(dir.path(), "v2");
        assert!(cache.is_empty());
        assert!(cache.get("a.v", &fp).is_none());
    }

    #[test]
    fn replaced_entry_artifact_is_collected() {
        let dir = tempfile::tempdir().unwrap();
        let file = source_file(dir.path(), "a.v");
        let cache = DiskCache::open(dir.path(), "v1");
        let old = ContentHash::from_bytes(b"old");
        let new = ContentHash::from_bytes(b"new");
        cache.set(&file, old, &analysis(&file)).unwrap();
        cache.set(&file, new, &analysis(&file)).unwrap();
        cache.save().unwrap();

        let artifacts = std::fs::read_dir(dir.path().join("analyses")).unwrap().count();
        assert_eq!(artifacts, 1);
    }

    #[test]
    fn deleted_source_is_pruned_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let kept = source_file(dir.path(), "kept.v");
        let gone = source_file(dir.path(), "gone.v");
        let fp = ContentHash::from_bytes(b"source");
        {
            let cache = DiskCache::open(dir.path(), "v1");
            cache.set(&kept, fp, &analysis(&kept)).unwrap();
            cache.set(&gone, fp, &analysis(&gone)).unwrap();
            std::fs::remove_file(&gone).unwrap();
            cache.save().unwrap();
        }

        let cache = DiskCache::open(dir.path(), "v1");
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&gone, &fp).is_none());
        assert_eq!(cache.get(&kept, &fp), Some(analysis(&kept)));
        let artifacts = std::fs::read_dir(dir.path().join("analyses")).unwrap().count();
        assert_eq!(artifacts, 1);
    }

    #[test]
    fn corrupt_artifact_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), "v1");
        let fp = ContentHash::from_bytes(b"source");
        cache.set("a.v", fp, &analysis("a.v")).unwrap();

        let key = artifact_key("a.v", &fp);
        std::fs::write(dir.path().join("analyses").join(format!("{key}.bin")), b"junk").unwrap();
        assert!(cache.get("a.v", &fp).is_none());
    }

    #[test]
    fn identical_sources_get_distinct_artifacts() {
        let fp = ContentHash::from_bytes(b"same bytes");
        assert_ne!(artifact_key("a.v", &fp), artifact_key("b.v", &fp));
    }
}
