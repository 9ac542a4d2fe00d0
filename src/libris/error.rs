use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Id prefix '{0}' matches more than one book")]
    AmbiguousId(String),

    #[error("Store '{key}' is corrupt: {source}")]
    CorruptStore {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid book: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LibrisError>;
