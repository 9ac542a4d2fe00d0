//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every libris operation, whatever the UI.
//!
//! It:
//! - **Dispatches** to the right command function
//! - **Normalizes inputs** (id prefixes → stored ids)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does not print, format, or hold business rules; those live in the CLI and
//! in `commands/*.rs` respectively.
//!
//! `LibrisApi<B: BlobStore>` is generic over the storage backend:
//! - Production: `LibrisApi<FsBlobStore>`
//! - Testing: `LibrisApi<MemBlobStore>`

use crate::commands;
use crate::config::LibrisConfig;
use crate::error::Result;
use crate::model::{BookInput, BookPatch, BookStatus};
use crate::store::{BlobStore, BookStore};
use std::path::{Path, PathBuf};

pub struct LibrisApi<B: BlobStore> {
    store: BookStore<B>,
    config: LibrisConfig,
    data_dir: PathBuf,
}

impl<B: BlobStore> LibrisApi<B> {
    /// Wrap a backend and load the collection named by `config.blob_name`.
    pub fn open(backend: B, config: LibrisConfig, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = BookStore::new(backend).with_key(config.blob_name.clone());
        let mut api = Self::with_store(store, config, data_dir);
        api.store.load()?;
        Ok(api)
    }

    /// Wrap an already configured store without loading it.
    pub fn with_store(
        store: BookStore<B>,
        config: LibrisConfig,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            config,
            data_dir: data_dir.into(),
        }
    }

    pub fn store(&self) -> &BookStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BookStore<B> {
        &mut self.store
    }

    pub fn config(&self) -> &LibrisConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn reload(&mut self) -> Result<commands::CmdResult> {
        let books = self.store.load()?;
        Ok(commands::CmdResult::default().with_listed_books(books))
    }

    pub fn add_book(&mut self, input: BookInput) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, input)
    }

    pub fn view_book(&self, selector: &str) -> Result<commands::CmdResult> {
        let id = self.resolve(selector)?;
        commands::view::run(&self.store, &id)
    }

    pub fn update_book(
        &mut self,
        selector: &str,
        patch: &BookPatch,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(selector)?;
        commands::update::run(&mut self.store, &id, patch)
    }

    pub fn set_status(
        &mut self,
        selector: &str,
        status: BookStatus,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(selector)?;
        commands::status::run(&mut self.store, &id, status)
    }

    pub fn toggle_favorite(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = self.resolve(selector)?;
        commands::favorite::toggle(&mut self.store, &id)
    }

    /// Removing something that is not there reports it and succeeds.
    pub fn remove_book(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = match self.resolve(selector) {
            Ok(id) => id,
            Err(crate::error::LibrisError::NotFound(_)) => selector.trim().to_string(),
            Err(e) => return Err(e),
        };
        commands::remove::run(&mut self.store, &id)
    }

    pub fn list_books(&self, filter: &ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn last_added(&self) -> Result<commands::CmdResult> {
        let filter = ListFilter {
            limit: Some(self.config.last_added_count),
            ..ListFilter::default()
        };
        commands::list::run(&self.store, &filter)
    }

    pub fn search_books(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, query)
    }

    pub fn filter_books(
        &self,
        statuses: &[BookStatus],
        min_rating: u8,
    ) -> Result<commands::CmdResult> {
        commands::filter::run(&self.store, statuses, min_rating)
    }

    pub fn genres(&self) -> Result<commands::CmdResult> {
        commands::genres::run(&self.store)
    }

    pub fn genre_books(&self, genre: &str) -> Result<commands::CmdResult> {
        commands::genres::books(&self.store, genre)
    }

    /// `count` of `None` uses the configured number of picks.
    pub fn random_books(&self, count: Option<usize>) -> Result<commands::CmdResult> {
        let count = count.unwrap_or(self.config.random_picks);
        commands::random::run(&self.store, count, &mut rand::thread_rng())
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    /// A new `blob-name` takes effect immediately: the store switches to that blob.
    pub fn configure(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            if config.blob_name != self.store.key() {
                self.store.switch_key(config.blob_name.clone())?;
            }
            self.config = config.clone();
        }
        Ok(result)
    }

    fn resolve(&self, selector: &str) -> Result<String> {
        commands::helpers::resolve_id(&self.store, selector)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::ListFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
