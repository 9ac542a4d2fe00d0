//! # Storage Layer
//!
//! Persistence is split in two, the same way the rest of the crate separates
//! "how" from "what":
//!
//! 1. [`BlobStore`]: raw key → bytes I/O. Knows nothing about books.
//! 2. [`book_store::BookStore`]: owns the in-memory collection, applies the
//!    model rules, and writes the whole collection through a `BlobStore` after
//!    every mutation.
//!
//! ## Consistency Model
//!
//! The collection is one blob. Every mutation is a full read-modify-write:
//! the next collection is built off to the side, serialized, written, and only
//! then swapped in. A failed write leaves memory exactly as it was.
//!
//! Mutations take `&mut self`, so two of them can never overlap on the same
//! store. Sharing a store across threads means wrapping it in a `Mutex`.
//!
//! ## Implementations
//!
//! - [`fs::FsBlobStore`]: one file per key inside a directory, written
//!   atomically (temp file + rename).
//! - [`memory::MemBlobStore`]: for tests; can simulate write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── books.json      # The collection (pretty-printed JSON array)
//! └── config.json     # LibrisConfig
//! ```

use crate::error::Result;
use std::path::PathBuf;

pub mod book_store;
pub mod fs;
pub mod memory;

pub use book_store::{BookStore, SubscriptionId};

pub const DEFAULT_BLOB_KEY: &str = "books.json";

/// Abstract interface for raw blob I/O.
pub trait BlobStore {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing has been written yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the blob under `key`.
    /// MUST be atomic: readers see either the old or the new bytes, never a mix.
    fn write_blob(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Where the blob lives. For MemBlobStore, a virtual path.
    fn blob_path(&self, key: &str) -> PathBuf;
}
