use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibrisError, Result};
use crate::model::{BookStatus, MAX_RATING};
use crate::store::{BlobStore, BookStore};
use crate::views;

pub fn run<B: BlobStore>(
    store: &BookStore<B>,
    statuses: &[BookStatus],
    min_rating: u8,
) -> Result<CmdResult> {
    if min_rating > MAX_RATING {
        return Err(LibrisError::Api(format!(
            "Minimum rating must be between 0 and {}",
            MAX_RATING
        )));
    }

    let mut result = CmdResult::default();
    if statuses.is_empty() && min_rating == 0 {
        result.add_message(CmdMessage::info("No filter selected"));
        return Ok(result);
    }

    let matches = views::filter_by_status_and_rating(store.books(), statuses, min_rating);
    if matches.is_empty() {
        result.add_message(CmdMessage::info("No books match the selected filters"));
    }
    Ok(result.with_listed_books(matches))
}
