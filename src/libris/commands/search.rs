use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{BlobStore, BookStore};
use crate::views;

pub fn run<B: BlobStore>(store: &BookStore<B>, query: &str) -> Result<CmdResult> {
    let matches = views::search(store.books(), query);

    let mut result = CmdResult::default();
    if query.trim().is_empty() {
        result.add_message(CmdMessage::warning("Type something to search for"));
    } else if matches.is_empty() {
        result.add_message(CmdMessage::info(format!("No books match '{}'", query.trim())));
    }
    Ok(result.with_listed_books(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{input, store};
    use crate::commands::MessageLevel;
    use crate::model::BookStatus;

    #[test]
    fn finds_by_title() {
        let mut store = store();
        store.add(input("The Hobbit", "Fantasy", BookStatus::ToRead)).unwrap();
        store.add(input("It", "Horror", BookStatus::ToRead)).unwrap();

        let result = run(&store, "hobbit").unwrap();
        assert_eq!(result.listed_books.len(), 1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn blank_query_warns() {
        let mut store = store();
        store.add(input("The Hobbit", "Fantasy", BookStatus::ToRead)).unwrap();
        let result = run(&store, " ").unwrap();
        assert!(result.listed_books.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }
}
