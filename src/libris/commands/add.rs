use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookInput;
use crate::store::{BlobStore, BookStore};

pub fn run<B: BlobStore>(store: &mut BookStore<B>, input: BookInput) -> Result<CmdResult> {
    let book = store.add(input)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book added: {} by {}",
        book.title, book.author
    )));
    result.affected_books.push(book);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{input, store};
    use crate::commands::MessageLevel;
    use crate::error::LibrisError;
    use crate::model::BookStatus;

    #[test]
    fn adds_and_reports() {
        let mut store = store();
        let result = run(&mut store, input("Dune", "fantascienza", BookStatus::ToRead)).unwrap();

        assert_eq!(result.affected_books.len(), 1);
        assert_eq!(result.affected_books[0].genre, "Science Fiction");
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_genre_is_rejected() {
        let mut store = store();
        let err = run(&mut store, input("Dune", "  ", BookStatus::ToRead)).unwrap_err();
        assert!(matches!(err, LibrisError::Validation(_)));
        assert!(store.is_empty());
    }
}
