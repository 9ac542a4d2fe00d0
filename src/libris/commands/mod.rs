use crate::config::LibrisConfig;
use crate::model::Book;
use crate::views::{GenreCount, GenreGroup, Stats};

pub mod add;
pub mod config;
pub mod favorite;
pub mod filter;
pub mod genres;
pub mod helpers;
pub mod list;
pub mod random;
pub mod remove;
pub mod search;
pub mod stats;
pub mod status;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub genre_groups: Vec<GenreGroup>,
    pub stats: Option<Stats>,
    pub histogram: Vec<GenreCount>,
    pub config: Option<LibrisConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_genre_groups(mut self, groups: Vec<GenreGroup>) -> Self {
        self.genre_groups = groups;
        self
    }

    pub fn with_stats(mut self, stats: Stats, histogram: Vec<GenreCount>) -> Self {
        self.stats = Some(stats);
        self.histogram = histogram;
        self
    }

    pub fn with_config(mut self, config: LibrisConfig) -> Self {
        self.config = Some(config);
        self
    }
}
