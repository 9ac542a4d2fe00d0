//! # Derived Views
//!
//! Pure projections of a book list: search, filtering, grouping, sampling and
//! statistics. Nothing here touches storage or keeps state; every function
//! recomputes from the slice it is given and preserves the slice's relative
//! order unless stated otherwise.

use crate::model::{Book, BookStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Case-insensitive substring match on title or author.
///
/// An empty (or whitespace-only) query matches nothing: search results are only
/// shown once the user has typed something.
pub fn search(books: &[Book], query: &str) -> Vec<Book> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    books
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle) || b.author.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Books whose status is in `statuses` (any status if empty) and whose rating is
/// at least `min_rating` (any rating if 0).
///
/// With no criteria at all the result is empty, not the whole list: the caller
/// shows its default view in that case.
pub fn filter_by_status_and_rating(
    books: &[Book],
    statuses: &[BookStatus],
    min_rating: u8,
) -> Vec<Book> {
    if statuses.is_empty() && min_rating == 0 {
        return Vec::new();
    }
    books
        .iter()
        .filter(|b| statuses.is_empty() || statuses.contains(&b.status))
        .filter(|b| min_rating == 0 || b.rating.is_some_and(|r| r >= min_rating))
        .cloned()
        .collect()
}

/// One genre bucket, books in collection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreGroup {
    pub genre: String,
    pub books: Vec<Book>,
}

impl GenreGroup {
    /// Cover of the most recently added book that has one.
    pub fn cover_image_uri(&self) -> Option<&str> {
        self.books.iter().find_map(|b| b.cover_image_uri.as_deref())
    }
}

/// Partition by genre. Buckets appear in the order their genre is first seen.
pub fn group_by_genre(books: &[Book]) -> Vec<GenreGroup> {
    let mut groups: Vec<GenreGroup> = Vec::new();
    for book in books {
        let genre = book.genre_bucket();
        match groups.iter_mut().find(|g| g.genre == genre) {
            Some(group) => group.books.push(book.clone()),
            None => groups.push(GenreGroup {
                genre: genre.to_string(),
                books: vec![book.clone()],
            }),
        }
    }
    groups
}

/// Books of one genre (case-insensitive; blank genres count as "Other").
pub fn books_in_genre(books: &[Book], genre: &str) -> Vec<Book> {
    let wanted = genre.trim().to_lowercase();
    books
        .iter()
        .filter(|b| b.genre_bucket().to_lowercase() == wanted)
        .cloned()
        .collect()
}

/// Up to `n` distinct books chosen uniformly without replacement, shuffled.
pub fn random_sample<R: Rng + ?Sized>(books: &[Book], n: usize, rng: &mut R) -> Vec<Book> {
    let mut picked: Vec<Book> = books.choose_multiple(rng, n).cloned().collect();
    picked.shuffle(rng);
    picked
}

/// The `n` most recently added books.
pub fn last_added(books: &[Book], n: usize) -> Vec<Book> {
    books.iter().take(n).cloned().collect()
}

pub fn favorites(books: &[Book]) -> Vec<Book> {
    books.iter().filter(|b| b.favorite).cloned().collect()
}

pub fn books_with_status(books: &[Book], status: BookStatus) -> Vec<Book> {
    books.iter().filter(|b| b.status == status).cloned().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub finished_count: usize,
    pub reading_count: usize,
    pub to_read_count: usize,
    pub favorite_count: usize,
    /// Mean rating over finished, rated books. 0 when there are none.
    pub average_rating: f64,
    /// Mean days from start to end over finished books with a valid range. 0 when there are none.
    pub average_read_days: f64,
}

pub fn compute_stats(books: &[Book]) -> Stats {
    let mut stats = Stats {
        total: books.len(),
        ..Stats::default()
    };

    let (mut rating_sum, mut rated) = (0u64, 0u64);
    let (mut days_sum, mut timed) = (0i64, 0i64);

    for book in books {
        match book.status {
            BookStatus::Finished => stats.finished_count += 1,
            BookStatus::Reading => stats.reading_count += 1,
            BookStatus::ToRead => stats.to_read_count += 1,
        }
        if book.favorite {
            stats.favorite_count += 1;
        }
        if !book.is_finished() {
            continue;
        }
        if let Some(rating) = book.rating {
            rating_sum += u64::from(rating);
            rated += 1;
        }
        if let Some(days) = book.read_days() {
            days_sum += days;
            timed += 1;
        }
    }

    if rated > 0 {
        stats.average_rating = rating_sum as f64 / rated as f64;
    }
    if timed > 0 {
        stats.average_read_days = days_sum as f64 / timed as f64;
    }
    stats
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Finished books per genre, in first-seen order. Genres with nothing finished are absent.
pub fn genre_histogram(books: &[Book]) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    for book in books.iter().filter(|b| b.is_finished()) {
        let genre = book.genre_bucket();
        match counts.iter_mut().find(|c| c.genre == genre) {
            Some(entry) => entry.count += 1,
            None => counts.push(GenreCount {
                genre: genre.to_string(),
                count: 1,
            }),
        }
    }
    counts
}
