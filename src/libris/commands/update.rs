use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookPatch;
use crate::store::{BlobStore, BookStore};

pub fn run<B: BlobStore>(
    store: &mut BookStore<B>,
    id: &str,
    patch: &BookPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if patch.is_empty() {
        let book = store.get(id)?;
        result.add_message(CmdMessage::info(format!("Nothing to update: {}", book.title)));
        return Ok(result);
    }

    let book = store.update(id, patch)?;
    result.add_message(CmdMessage::success(format!("Book updated: {}", book.title)));
    result.affected_books.push(book);
    Ok(result)
}
