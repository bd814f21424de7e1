//! Filesystem backend for the note store.
//!
//! All files live flat inside one directory. Writes go to a sibling temp file
//! which is fsynced and then renamed over the target, so a crash mid-write
//! leaves either the old file or the new one, never a torn mix.

use std::path::{Path, PathBuf};

use chrono::Utc;
use ponder_core::{Error, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Directory-backed file storage.
#[derive(Debug, Clone)]
pub struct FilesystemBackend {
    base_path: PathBuf,
}

impl FilesystemBackend {
    /// Create a new filesystem backend rooted at `base_path`.
    ///
    /// Nothing is touched on disk until [`ensure_ready`](Self::ensure_ready).
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn full_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Create the directory and prove it is writable.
    ///
    /// Performs a write/read/delete round trip so permission problems surface
    /// at startup as `StorageUnavailable` instead of on the first capture.
    pub async fn ensure_ready(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            Error::StorageUnavailable(format!(
                "create_dir_all({}): {}",
                self.base_path.display(),
                e
            ))
        })?;

        let marker = self.base_path.join(".write-check");
        let data = b"ponder-storage-check";
        fs::write(&marker, data).await.map_err(|e| {
            Error::StorageUnavailable(format!("write({}): {}", marker.display(), e))
        })?;
        let read_back = fs::read(&marker).await.map_err(|e| {
            Error::StorageUnavailable(format!("read({}): {}", marker.display(), e))
        })?;
        if let Err(e) = fs::remove_file(&marker).await {
            warn!(check_path = %marker.display(), error = %e, "storage: write check cleanup failed");
        }
        if read_back != data {
            return Err(Error::StorageUnavailable(format!(
                "read-back mismatch in {}",
                self.base_path.display()
            )));
        }
        Ok(())
    }

    /// Atomically replace `name` with `data`.
    pub async fn write_atomic(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(name);
        debug!(storage_path = %full_path.display(), size = data.len(), "storage: write");

        let temp_path = self.full_path(&format!("{}.tmp", name));
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            warn!(temp_path = %temp_path.display(), error = %e, "storage: File::create failed");
            Error::StorageUnavailable(format!("create({}): {}", temp_path.display(), e))
        })?;
        file.write_all(data).await.map_err(|e| {
            warn!(error = %e, "storage: write_all failed");
            Error::StorageUnavailable(format!("write({}): {}", temp_path.display(), e))
        })?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &full_path).await.map_err(|e| {
            warn!(from = %temp_path.display(), to = %full_path.display(), error = %e, "storage: rename failed");
            Error::StorageUnavailable(format!("rename({}): {}", full_path.display(), e))
        })?;
        Ok(())
    }

    /// Read `name`, returning `None` when it does not exist.
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.full_path(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(fs::try_exists(self.full_path(name)).await?)
    }

    /// Size of `name` in bytes, 0 when absent.
    pub async fn size(&self, name: &str) -> u64 {
        fs::metadata(self.full_path(name))
            .await
            .map(|m| m.len())
            .unwrap_or(0)
    }

    /// Move a damaged file aside so it is never silently overwritten.
    ///
    /// Returns the new path.
    pub async fn quarantine(&self, name: &str) -> Result<PathBuf> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let target = self.full_path(&format!("{}.corrupt-{}", name, stamp));
        fs::rename(self.full_path(name), &target).await?;
        warn!(storage_path = %target.display(), "storage: quarantined corrupt file");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_ready_creates_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(tmp.path().join("a/b/.ponder"));
        backend.ensure_ready().await.unwrap();
        assert!(backend.base_path().is_dir());
        assert!(!backend.full_path(".write-check").exists());
    }

    #[tokio::test]
    async fn test_ensure_ready_clears_leftover_write_check() {
        let tmp = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(tmp.path());
        std::fs::write(backend.full_path(".write-check"), b"from a crashed run").unwrap();

        backend.ensure_ready().await.unwrap();
        assert!(!backend.full_path(".write-check").exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_and_leaves_no_temp() {
        let tmp = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(tmp.path());
        backend.write_atomic("f.json", b"one").await.unwrap();
        backend.write_atomic("f.json", b"two").await.unwrap();

        assert_eq!(backend.read("f.json").await.unwrap().unwrap(), b"two");
        assert!(!backend.full_path("f.json.tmp").exists());
        assert_eq!(backend.size("f.json").await, 3);
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(tmp.path());
        assert!(backend.read("nope.json").await.unwrap().is_none());
        assert_eq!(backend.size("nope.json").await, 0);
        assert!(!backend.exists("nope.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_quarantine_moves_file() {
        let tmp = TempDir::new().unwrap();
        let backend = FilesystemBackend::new(tmp.path());
        backend.write_atomic("thoughts.json", b"{{{").await.unwrap();

        let moved = backend.quarantine("thoughts.json").await.unwrap();
        assert!(moved.exists());
        assert!(!backend.exists("thoughts.json").await.unwrap());
        assert_eq!(std::fs::read(moved).unwrap(), b"{{{");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ensure_ready_fails_on_readonly_parent() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let ro = tmp.path().join("ro");
        std::fs::create_dir(&ro).unwrap();
        std::fs::set_permissions(&ro, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores permission bits; nothing to assert in that case.
        if std::fs::write(ro.join("x"), b"x").is_ok() {
            return;
        }

        let backend = FilesystemBackend::new(ro.join(".ponder"));
        let err = backend.ensure_ready().await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }
}
