use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{BlobStore, BookStore};

pub fn run<B: BlobStore>(store: &mut BookStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.remove(id)? {
        Some(book) => {
            result.add_message(CmdMessage::success(format!("Book removed: {}", book.title)));
            result.affected_books.push(book);
        }
        None => result.add_message(CmdMessage::info(format!("No book with id {}", id))),
    }
    Ok(result)
}
