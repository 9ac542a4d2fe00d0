use crate::error::{LibrisError, Result};
use crate::store::{BlobStore, BookStore};

/// Resolve a full id or a unique id prefix to the stored id.
pub fn resolve_id<B: BlobStore>(store: &BookStore<B>, selector: &str) -> Result<String> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(LibrisError::Api("Book id cannot be empty".into()));
    }

    if let Some(book) = store.books().iter().find(|b| b.id == selector) {
        return Ok(book.id.clone());
    }

    let needle = selector.to_lowercase();
    let mut matches = store
        .books()
        .iter()
        .filter(|b| b.id.to_lowercase().starts_with(&needle));

    match (matches.next(), matches.next()) {
        (Some(book), None) => Ok(book.id.clone()),
        (Some(_), Some(_)) => Err(LibrisError::AmbiguousId(selector.to_string())),
        (None, _) => Err(LibrisError::NotFound(selector.to_string())),
    }
}
