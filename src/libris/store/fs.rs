use super::BlobStore;
use crate::error::{LibrisError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Directory-backed blob store: each key is a file under `root`.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LibrisError::Io)?;
        }
        Ok(())
    }

    fn check_key(key: &str) -> Result<()> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(LibrisError::Store(format!("Invalid blob key: '{}'", key)));
        }
        Ok(())
    }
}

impl BlobStore for FsBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Self::check_key(key)?;
        let path = self.blob_path(key);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "read blob");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LibrisError::Io(e)),
        }
    }

    fn write_blob(&self, key: &str, bytes: &[u8]) -> Result<()> {
        Self::check_key(key)?;
        self.ensure_dir()?;

        let target = self.blob_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(LibrisError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(LibrisError::Io(e));
        }

        debug!(path = %target.display(), bytes = bytes.len(), "wrote blob");
        Ok(())
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_blob_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FsBlobStore::new(dir.path());
        assert!(store.read_blob("books.json").unwrap().is_none());
    }

    #[test]
    fn write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FsBlobStore::new(&root);
        store.write_blob("books.json", b"[]").unwrap();
        assert_eq!(fs::read(root.join("books.json")).unwrap(), b"[]");
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let dir = TempDir::new().unwrap();
        let store = FsBlobStore::new(dir.path());
        assert!(store.write_blob("../books.json", b"[]").is_err());
        assert!(store.read_blob("").is_err());
    }
}
