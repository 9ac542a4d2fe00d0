use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{BlobStore, BookStore};
use crate::views;

/// All genre buckets present in the collection.
pub fn run<B: BlobStore>(store: &BookStore<B>) -> Result<CmdResult> {
    let groups = views::group_by_genre(store.books());
    let mut result = CmdResult::default();
    if groups.is_empty() {
        result.add_message(CmdMessage::info("No books yet"));
    }
    Ok(result.with_genre_groups(groups))
}

/// Books of a single genre.
pub fn books<B: BlobStore>(store: &BookStore<B>, genre: &str) -> Result<CmdResult> {
    let books = views::books_in_genre(store.books(), genre);
    let mut result = CmdResult::default();
    if books.is_empty() {
        result.add_message(CmdMessage::info(format!("No books in {}", genre.trim())));
    }
    Ok(result.with_listed_books(books))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{input, store};
    use crate::model::BookStatus;

    #[test]
    fn groups_collection() {
        let mut store = store();
        store.add(input("A", "Fantasy", BookStatus::ToRead)).unwrap();
        store.add(input("B", "Horror", BookStatus::ToRead)).unwrap();
        store.add(input("C", "Fantasy", BookStatus::ToRead)).unwrap();

        let result = run(&store).unwrap();
        let genres: Vec<_> = result.genre_groups.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(genres, ["Fantasy", "Horror"]);
        assert_eq!(result.genre_groups[0].books.len(), 2);
    }

    #[test]
    fn books_of_one_genre() {
        let mut store = store();
        store.add(input("A", "Fantasy", BookStatus::ToRead)).unwrap();
        store.add(input("B", "Horror", BookStatus::ToRead)).unwrap();

        let result = books(&store, "HORROR").unwrap();
        assert_eq!(result.listed_books.len(), 1);
        assert!(books(&store, "Poetry").unwrap().listed_books.is_empty());
    }
}
