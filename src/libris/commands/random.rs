use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{BlobStore, BookStore};
use crate::views;
use rand::Rng;

pub fn run<B: BlobStore, R: Rng + ?Sized>(
    store: &BookStore<B>,
    count: usize,
    rng: &mut R,
) -> Result<CmdResult> {
    let picks = views::random_sample(store.books(), count, rng);
    let mut result = CmdResult::default();
    if picks.is_empty() {
        result.add_message(CmdMessage::info("Nothing to pick from yet"));
    }
    Ok(result.with_listed_books(picks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{input, store};
    use crate::model::BookStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picks_requested_count() {
        let mut store = store();
        for i in 0..5 {
            store.add(input(&format!("Book {}", i), "Fantasy", BookStatus::ToRead)).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(42);
        let result = run(&store, 3, &mut rng).unwrap();
        assert_eq!(result.listed_books.len(), 3);
    }

    #[test]
    fn empty_collection_reports() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(42);
        let result = run(&store, 3, &mut rng).unwrap();
        assert!(result.listed_books.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
