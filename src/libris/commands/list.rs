use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::BookStatus;
use crate::store::{BlobStore, BookStore};
use crate::views;

/// Narrowing applied by `list`. The default lists everything, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub status: Option<BookStatus>,
    pub favorites_only: bool,
    pub genre: Option<String>,
    pub limit: Option<usize>,
}

pub fn run<B: BlobStore>(store: &BookStore<B>, filter: &ListFilter) -> Result<CmdResult> {
    let mut books = store.list();

    if let Some(status) = filter.status {
        books = views::books_with_status(&books, status);
    }
    if filter.favorites_only {
        books = views::favorites(&books);
    }
    if let Some(genre) = &filter.genre {
        books = views::books_in_genre(&books, genre);
    }
    if let Some(limit) = filter.limit {
        books = views::last_added(&books, limit);
    }

    Ok(CmdResult::default().with_listed_books(books))
}
