use super::BlobStore;
use crate::error::{LibrisError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory blob store for testing.
///
/// Uses `RefCell` for interior mutability so `BlobStore` can keep `&self`
/// on every method.
#[derive(Default)]
pub struct MemBlobStore {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob directly, bypassing the write counter.
    pub fn with_blob(self, key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.borrow_mut().insert(key.to_string(), bytes.into());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl BlobStore for MemBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blob(key))
    }

    fn write_blob(&self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(LibrisError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}
