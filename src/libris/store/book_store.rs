use super::{BlobStore, DEFAULT_BLOB_KEY};
use crate::error::{LibrisError, Result};
use crate::model::{new_book_id, today, Book, BookInput, BookPatch};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

const MAX_ID_ATTEMPTS: usize = 8;

type Listener = Box<dyn Fn(&[Book]) + Send>;

/// Handle returned by [`BookStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The single source of truth for the collection.
///
/// Holds the books in memory (newest first) and keeps the backend blob in step
/// with them: every successful mutation has been written before it returns,
/// every failed one leaves both memory and blob untouched.
pub struct BookStore<B: BlobStore> {
    backend: B,
    key: String,
    books: Vec<Book>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    id_generator: Box<dyn FnMut() -> String + Send>,
    clock: Box<dyn Fn() -> NaiveDate + Send>,
}

impl<B: BlobStore> BookStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            key: DEFAULT_BLOB_KEY.to_string(),
            books: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            id_generator: Box::new(new_book_id),
            clock: Box::new(today),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_id_generator(mut self, generator: impl FnMut() -> String + Send + 'static) -> Self {
        self.id_generator = Box::new(generator);
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the in-memory collection with what the backend holds.
    ///
    /// A missing blob is an empty library; a blob that does not parse is
    /// `CorruptStore`, and the current collection is kept.
    pub fn load(&mut self) -> Result<Vec<Book>> {
        let books = read_collection(&self.backend, &self.key)?;
        debug!(key = %self.key, count = books.len(), "loaded collection");
        self.books = books;
        self.notify();
        Ok(self.books.clone())
    }

    /// Point the store at another blob and load it. On error the store keeps
    /// its current key and books.
    pub fn switch_key(&mut self, key: impl Into<String>) -> Result<Vec<Book>> {
        let key = key.into();
        let books = read_collection(&self.backend, &key)?;
        debug!(from = %self.key, to = %key, count = books.len(), "switched collection");
        self.key = key;
        self.books = books;
        self.notify();
        Ok(self.books.clone())
    }

    /// Snapshot of the collection, newest first.
    pub fn list(&self) -> Vec<Book> {
        self.books.clone()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<Book> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| LibrisError::NotFound(id.to_string()))
    }

    pub fn add(&mut self, input: BookInput) -> Result<Book> {
        let id = self.mint_id()?;
        let book = input.into_book(id, (self.clock)())?;

        let mut next = Vec::with_capacity(self.books.len() + 1);
        next.push(book.clone());
        next.extend(self.books.iter().cloned());
        self.commit(next)?;

        info!(id = %book.id, title = %book.title, "added book");
        Ok(book)
    }

    pub fn update(&mut self, id: &str, patch: &BookPatch) -> Result<Book> {
        let pos = self
            .position(id)
            .ok_or_else(|| LibrisError::NotFound(id.to_string()))?;

        let mut book = self.books[pos].clone();
        patch.apply_to(&mut book)?;
        book.normalize((self.clock)());
        book.validate()?;

        let mut next = self.books.clone();
        next[pos] = book.clone();
        self.commit(next)?;

        info!(id = %book.id, status = %book.status, "updated book");
        Ok(book)
    }

    /// Remove a book. Removing an id that is not there is a no-op.
    pub fn remove(&mut self, id: &str) -> Result<Option<Book>> {
        let Some(pos) = self.position(id) else {
            debug!(id = %id, "remove: no such book, nothing to do");
            return Ok(None);
        };

        let mut next = self.books.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        info!(id = %removed.id, title = %removed.title, "removed book");
        Ok(Some(removed))
    }

    /// Register a listener called with the new snapshot after `load` and
    /// after every successful mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&[Book]) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    fn mint_id(&mut self) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.id_generator)();
            if !id.is_empty() && self.position(&id).is_none() {
                return Ok(id);
            }
            warn!(id = %id, "generated id already in use, retrying");
        }
        Err(LibrisError::Store("Could not generate a unique book id".into()))
    }

    fn commit(&mut self, next: Vec<Book>) -> Result<()> {
        if let Err(e) = write_collection(&self.backend, &self.key, &next) {
            warn!(key = %self.key, error = %e, "write failed, collection left unchanged");
            return Err(e);
        }
        self.books = next;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.books);
        }
    }
}

pub fn read_collection<B: BlobStore>(backend: &B, key: &str) -> Result<Vec<Book>> {
    match backend.read_blob(key)? {
        None => Ok(Vec::new()),
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| LibrisError::CorruptStore {
            key: key.to_string(),
            source,
        }),
    }
}

pub fn write_collection<B: BlobStore>(backend: &B, key: &str, books: &[Book]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(books)?;
    backend.write_blob(key, &bytes)
}
