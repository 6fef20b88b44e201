//! On-disk tool cache keyed by `(tool, version)`.
//!
//! Layout is `<root>/<tool>/<version>`; an entry, once created, is treated
//! as immutable and reused across runs. Publication into the cache is a
//! directory rename, so concurrent writers racing on the same key settle on
//! whichever rename lands first.

use nitro_action_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem cache of extracted tool installations.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    /// Create a cache rooted at an explicit directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create a cache under the default per-user location.
    #[must_use]
    pub fn with_default_root() -> Self {
        Self::new(default_root())
    }

    /// The directory an entry would occupy.
    #[must_use]
    pub fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version)
    }

    /// A staging directory for extraction, on the same filesystem as the
    /// cache so publication can be a rename.
    #[must_use]
    pub fn staging_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(".staging").join(format!("{tool}-{version}"))
    }

    /// Look up a cached installation. Returns its directory on a hit.
    #[must_use]
    pub fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        if dir.is_dir() {
            debug!(dir = %dir.display(), "Tool cache hit");
            Some(dir)
        } else {
            None
        }
    }

    /// Publish an extracted directory into the cache.
    ///
    /// If another writer won the race for this key, the staged copy is
    /// discarded and the existing entry is returned; content for a fixed
    /// version is expected identical.
    pub fn store(&self, extracted: &Path, tool: &str, version: &str) -> Result<PathBuf> {
        let dest = self.entry_dir(tool, version);

        if dest.is_dir() {
            let _ = std::fs::remove_dir_all(extracted);
            debug!(dir = %dest.display(), "Cache entry already present; keeping existing");
            return Ok(dest);
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(e, "create cache directory"))?;
        }
        std::fs::rename(extracted, &dest)
            .map_err(|e| Error::io(e, format!("publish cache entry {}", dest.display())))?;

        debug!(dir = %dest.display(), "Stored tool in cache");
        Ok(dest)
    }
}

/// Default cache root under the user cache directory.
#[must_use]
pub fn default_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("nitro-action")
        .join("tools")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_miss() {
        let root = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(root.path().to_path_buf());
        assert!(cache.find("nitro", "2.1.0").is_none());
    }

    #[test]
    fn test_store_then_find() {
        let root = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(root.path().to_path_buf());

        let staged = cache.staging_dir("nitro", "2.1.0");
        std::fs::create_dir_all(&staged).unwrap();
        std::fs::write(staged.join("nitro"), b"binary").unwrap();

        let stored = cache.store(&staged, "nitro", "2.1.0").unwrap();
        assert_eq!(stored, root.path().join("nitro").join("2.1.0"));
        assert!(stored.join("nitro").is_file());
        assert!(!staged.exists());

        assert_eq!(cache.find("nitro", "2.1.0").unwrap(), stored);
    }

    #[test]
    fn test_store_keeps_existing_entry() {
        let root = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(root.path().to_path_buf());

        let existing = cache.entry_dir("nitro", "2.1.0");
        std::fs::create_dir_all(&existing).unwrap();
        std::fs::write(existing.join("nitro"), b"first").unwrap();

        let staged = cache.staging_dir("nitro", "2.1.0");
        std::fs::create_dir_all(&staged).unwrap();
        std::fs::write(staged.join("nitro"), b"second").unwrap();

        let stored = cache.store(&staged, "nitro", "2.1.0").unwrap();
        assert_eq!(std::fs::read(stored.join("nitro")).unwrap(), b"first");
        assert!(!staged.exists());
    }

    #[test]
    fn test_entries_are_keyed_by_version() {
        let root = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(root.path().to_path_buf());
        std::fs::create_dir_all(cache.entry_dir("nitro", "2.0.0")).unwrap();

        assert!(cache.find("nitro", "2.0.0").is_some());
        assert!(cache.find("nitro", "2.1.0").is_none());
        assert!(cache.find("other", "2.0.0").is_none());
    }

    #[test]
    fn test_default_root_location() {
        assert!(default_root().ends_with("nitro-action/tools"));
    }
}
