use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{BlobStore, BookStore};

pub fn run<B: BlobStore>(store: &BookStore<B>, id: &str) -> Result<CmdResult> {
    let book = store.get(id)?;
    Ok(CmdResult::default().with_listed_books(vec![book]))
}
