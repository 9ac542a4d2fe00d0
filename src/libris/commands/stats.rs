use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{BlobStore, BookStore};
use crate::views;

pub fn run<B: BlobStore>(store: &BookStore<B>) -> Result<CmdResult> {
    let books = store.books();
    let stats = views::compute_stats(books);
    let histogram = views::genre_histogram(books);
    Ok(CmdResult::default().with_stats(stats, histogram))
}
