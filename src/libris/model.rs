//! # Data Model
//!
//! A [`Book`] is the only persisted entity. Everything else in the crate is either
//! a way to store a list of books or a projection of one.
//!
//! ## Status-driven fields
//!
//! Some fields only mean something in certain states:
//!
//! | status     | date_start | date_end | rating | notes |
//! |------------|------------|----------|--------|-------|
//! | `to_read`  | cleared    | cleared  | cleared| cleared |
//! | `reading`  | required   | cleared  | cleared| cleared |
//! | `finished` | required   | optional | optional | optional |
//!
//! [`Book::apply_status_rules`] enforces the table after every merge, so a book
//! moved back to `to_read` never keeps a stale rating around.
//!
//! ## Legacy input
//!
//! Collections written by older clients use free-form status strings (including
//! Italian labels with inconsistent casing), store a rating of `0` for "unrated",
//! and use empty strings instead of nulls. All of that is normalised here, at the
//! deserialization boundary, so the rest of the crate only sees clean values.

use crate::error::{LibrisError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const OTHER_GENRE: &str = "Other";
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reading state of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BookStatus {
    #[default]
    ToRead,
    Reading,
    Finished,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [
        BookStatus::ToRead,
        BookStatus::Reading,
        BookStatus::Finished,
    ];

    /// Wire representation, as written to the blob.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::ToRead => "to_read",
            BookStatus::Reading => "reading",
            BookStatus::Finished => "finished",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::ToRead => "To read",
            BookStatus::Reading => "Reading",
            BookStatus::Finished => "Finished",
        }
    }

    pub fn requires_start_date(&self) -> bool {
        matches!(self, BookStatus::Reading | BookStatus::Finished)
    }
}

impl FromStr for BookStatus {
    type Err = LibrisError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "to_read" | "toread" | "unread" | "da_leggere" => Ok(BookStatus::ToRead),
            "reading" | "in_progress" | "in_lettura" => Ok(BookStatus::Reading),
            "finished" | "read" | "done" | "letto" => Ok(BookStatus::Finished),
            _ => Err(LibrisError::Validation(format!("Unknown status: {}", s))),
        }
    }
}

impl TryFrom<String> for BookStatus {
    type Error = LibrisError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<BookStatus> for String {
    fn from(status: BookStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed catalogue of genres offered when adding a book.
///
/// Books may still carry a label outside this list (older data, or a caller that
/// supplies its own); those labels are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Fiction,
    Fantasy,
    ScienceFiction,
    Mystery,
    Horror,
    HistoricalFiction,
    Biography,
    Nonfiction,
    Adventure,
    Poetry,
    Thriller,
    YoungAdult,
    Classic,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 14] = [
        Genre::Fiction,
        Genre::Fantasy,
        Genre::ScienceFiction,
        Genre::Mystery,
        Genre::Horror,
        Genre::HistoricalFiction,
        Genre::Biography,
        Genre::Nonfiction,
        Genre::Adventure,
        Genre::Poetry,
        Genre::Thriller,
        Genre::YoungAdult,
        Genre::Classic,
        Genre::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Mystery => "Mystery",
            Genre::Horror => "Horror",
            Genre::HistoricalFiction => "Historical Fiction",
            Genre::Biography => "Biography",
            Genre::Nonfiction => "Nonfiction",
            Genre::Adventure => "Adventure",
            Genre::Poetry => "Poetry",
            Genre::Thriller => "Thriller",
            Genre::YoungAdult => "Young Adult",
            Genre::Classic => "Classic",
            Genre::Other => OTHER_GENRE,
        }
    }

    // Labels used by the first version of the app
    fn legacy_labels(&self) -> &'static [&'static str] {
        match self {
            Genre::Fiction => &["narrativa"],
            Genre::ScienceFiction => &["fantascienza", "sci-fi", "scifi"],
            Genre::Mystery => &["giallo"],
            Genre::HistoricalFiction => &["romanzo storico"],
            Genre::Biography => &["biografia"],
            Genre::Nonfiction => &["saggio", "non-fiction"],
            Genre::Adventure => &["avventura"],
            Genre::Poetry => &["poesia"],
            Genre::Classic => &["classico"],
            Genre::Other => &["altro"],
            Genre::Fantasy | Genre::Horror | Genre::Thriller | Genre::YoungAdult => &[],
        }
    }

    /// Case-insensitive lookup by label or legacy label.
    pub fn parse(s: &str) -> Option<Genre> {
        let needle = s.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Genre::ALL.into_iter().find(|g| {
            g.label().to_lowercase() == needle || g.legacy_labels().contains(&needle.as_str())
        })
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps known labels to their catalogue spelling, leaves anything else as given.
pub fn canonical_genre(raw: &str) -> String {
    match Genre::parse(raw) {
        Some(genre) => genre.label().to_string(),
        None => raw.trim().to_string(),
    }
}

pub fn new_book_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| LibrisError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

// Older records sometimes carry a full ISO timestamp
fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    parse_date(day)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default = "stored_genre_fallback", deserialize_with = "genre_from_stored")]
    pub genre: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cover_image_uri: Option<String>,
    pub status: BookStatus,
    #[serde(default, deserialize_with = "date_from_stored")]
    pub date_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "date_from_stored")]
    pub date_end: Option<NaiveDate>,
    #[serde(default, deserialize_with = "rating_from_stored")]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl Book {
    /// Clears the fields that have no meaning in the current status.
    pub fn apply_status_rules(&mut self) {
        if self.status != BookStatus::Finished {
            self.date_end = None;
            self.rating = None;
            self.notes = None;
        }
        if self.status == BookStatus::ToRead {
            self.date_start = None;
        }
    }

    /// Applies the status rules and stamps a start date if the status needs one.
    pub fn normalize(&mut self, today: NaiveDate) {
        self.apply_status_rules();
        if self.status.requires_start_date() && self.date_start.is_none() {
            self.date_start = Some(today);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(LibrisError::Validation("Title cannot be empty".into()));
        }
        if self.author.trim().is_empty() {
            return Err(LibrisError::Validation("Author cannot be empty".into()));
        }
        if self.genre.trim().is_empty() {
            return Err(LibrisError::Validation("Genre cannot be empty".into()));
        }
        if let Some(rating) = self.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(LibrisError::Validation(format!(
                    "Rating must be between {} and {}, got {}",
                    MIN_RATING, MAX_RATING, rating
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.date_start, self.date_end) {
            if end < start {
                return Err(LibrisError::Validation(format!(
                    "End date {} is before start date {}",
                    end, start
                )));
            }
        }
        Ok(())
    }

    /// Genre label used for grouping; blank genres fall into "Other".
    pub fn genre_bucket(&self) -> &str {
        let genre = self.genre.trim();
        if genre.is_empty() {
            OTHER_GENRE
        } else {
            genre
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == BookStatus::Finished
    }

    /// Whole days between start and end, for finished books with a sane range.
    pub fn read_days(&self) -> Option<i64> {
        if !self.is_finished() {
            return None;
        }
        let (start, end) = (self.date_start?, self.date_end?);
        let days = end.signed_duration_since(start).num_days();
        (days >= 0).then_some(days)
    }
}

/// Caller-supplied fields for a new book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub synopsis: String,
    pub genre: String,
    pub cover_image_uri: Option<String>,
    pub status: BookStatus,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub rating: Option<u8>,
    pub notes: Option<String>,
    pub favorite: bool,
}

impl BookInput {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        cover_image_uri: impl Into<String>,
        status: BookStatus,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            cover_image_uri: Some(cover_image_uri.into()),
            status,
            ..Self::default()
        }
    }

    /// Builds the stored record: checks required fields, mints nothing itself.
    pub fn into_book(self, id: String, today: NaiveDate) -> Result<Book> {
        let cover = self
            .cover_image_uri
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| LibrisError::Validation("A cover image is required".into()))?;

        let mut book = Book {
            id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            synopsis: self.synopsis,
            genre: canonical_genre(&self.genre),
            cover_image_uri: Some(cover),
            status: self.status,
            date_start: self.date_start,
            date_end: self.date_end,
            rating: self.rating,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            favorite: self.favorite,
        };
        book.normalize(today);
        book.validate()?;
        Ok(book)
    }
}

/// Partial update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub synopsis: Option<String>,
    pub genre: Option<String>,
    pub cover_image_uri: Option<String>,
    pub status: Option<BookStatus>,
    pub date_start: Option<Option<NaiveDate>>,
    pub date_end: Option<Option<NaiveDate>>,
    pub rating: Option<Option<u8>>,
    pub notes: Option<Option<String>>,
    pub favorite: Option<bool>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn cover_image_uri(mut self, uri: impl Into<String>) -> Self {
        self.cover_image_uri = Some(uri.into());
        self
    }

    pub fn status(mut self, status: BookStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn date_start(mut self, date: Option<NaiveDate>) -> Self {
        self.date_start = Some(date);
        self
    }

    pub fn date_end(mut self, date: Option<NaiveDate>) -> Self {
        self.date_end = Some(date);
        self
    }

    pub fn rating(mut self, rating: Option<u8>) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge over `book`. Does not normalise or validate.
    pub fn apply_to(&self, book: &mut Book) -> Result<()> {
        if let Some(title) = &self.title {
            book.title = title.trim().to_string();
        }
        if let Some(author) = &self.author {
            book.author = author.trim().to_string();
        }
        if let Some(synopsis) = &self.synopsis {
            book.synopsis = synopsis.clone();
        }
        if let Some(genre) = &self.genre {
            book.genre = canonical_genre(genre);
        }
        if let Some(uri) = &self.cover_image_uri {
            let uri = uri.trim();
            if uri.is_empty() {
                return Err(LibrisError::Validation("A cover image is required".into()));
            }
            book.cover_image_uri = Some(uri.to_string());
        }
        if let Some(status) = self.status {
            book.status = status;
        }
        if let Some(date) = self.date_start {
            book.date_start = date;
        }
        if let Some(date) = self.date_end {
            book.date_end = date;
        }
        if let Some(rating) = self.rating {
            book.rating = rating;
        }
        if let Some(notes) = &self.notes {
            book.notes = notes.clone().filter(|n| !n.trim().is_empty());
        }
        if let Some(favorite) = self.favorite {
            book.favorite = favorite;
        }
        Ok(())
    }
}

fn genre_from_stored<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(stored_genre_fallback());
    }
    Ok(canonical_genre(&raw))
}

fn stored_genre_fallback() -> String {
    OTHER_GENRE.to_string()
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn date_from_stored<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            parse_stored_date(&raw).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

// 0 was the "no rating" sentinel in older collections
fn rating_from_stored<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u8>::deserialize(deserializer)?;
    Ok(raw.filter(|r| *r > 0))
}
