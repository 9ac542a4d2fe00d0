use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookPatch;
use crate::store::{BlobStore, BookStore};

pub fn toggle<B: BlobStore>(store: &mut BookStore<B>, id: &str) -> Result<CmdResult> {
    let current = store.get(id)?;
    let book = store.update(id, &BookPatch::new().favorite(!current.favorite))?;

    let mut result = CmdResult::default();
    let verb = if book.favorite { "Added to" } else { "Removed from" };
    result.add_message(CmdMessage::success(format!("{} favorites: {}", verb, book.title)));
    result.affected_books.push(book);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{input, store};
    use crate::model::BookStatus;

    #[test]
    fn toggles_back_and_forth() {
        let mut store = store();
        store.add(input("Dune", "Fantasy", BookStatus::Reading)).unwrap();

        assert!(toggle(&mut store, "book-1").unwrap().affected_books[0].favorite);
        assert!(!toggle(&mut store, "book-1").unwrap().affected_books[0].favorite);
        assert_eq!(store.get("book-1").unwrap().status, BookStatus::Reading);
    }
}
