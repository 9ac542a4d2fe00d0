use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{BookPatch, BookStatus};
use crate::store::{BlobStore, BookStore};

/// Move a book to `status`. Entering `reading` or `finished` without a start
/// date stamps today's date.
pub fn run<B: BlobStore>(
    store: &mut BookStore<B>,
    id: &str,
    status: BookStatus,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let current = store.get(id)?;
    if current.status == status {
        result.add_message(CmdMessage::info(format!(
            "{} is already {}",
            current.title,
            status.label().to_lowercase()
        )));
        return Ok(result);
    }

    let book = store.update(id, &BookPatch::new().status(status))?;
    result.add_message(CmdMessage::success(format!(
        "{}: {} -> {}",
        book.title,
        current.status.label(),
        book.status.label()
    )));
    result.affected_books.push(book);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{input, store};
    use crate::model::parse_date;

    #[test]
    fn starting_a_book_stamps_today() {
        let mut store = store();
        store.add(input("Dune", "Fantasy", BookStatus::ToRead)).unwrap();

        let result = run(&mut store, "book-1", BookStatus::Reading).unwrap();
        let book = &result.affected_books[0];
        assert_eq!(book.status, BookStatus::Reading);
        assert_eq!(book.date_start, Some(parse_date("2024-06-01").unwrap()));
    }

    #[test]
    fn same_status_is_a_no_op() {
        let mut store = store();
        store.add(input("Dune", "Fantasy", BookStatus::ToRead)).unwrap();
        let writes = store.backend().write_count();

        let result = run(&mut store, "book-1", BookStatus::ToRead).unwrap();
        assert!(result.affected_books.is_empty());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn back_to_to_read_clears_everything() {
        let mut store = store();
        let mut finished = input("Dune", "Fantasy", BookStatus::Finished);
        finished.rating = Some(5);
        finished.notes = Some("Great".into());
        store.add(finished).unwrap();

        let result = run(&mut store, "book-1", BookStatus::ToRead).unwrap();
        let book = &result.affected_books[0];
        assert!(book.date_start.is_none());
        assert!(book.rating.is_none());
        assert!(book.notes.is_none());
    }
}
