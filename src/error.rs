use thiserror::Error;

/// Failure reading or writing the persisted notebook.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database request failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("genre {0} does not exist")]
    UnknownGenre(i64),
    #[error("error accessing snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version: {found} (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },
}

/// User-entered text that cannot be stored as given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// A screen was requested with arguments it cannot be built from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("genre {0} no longer exists")]
    UnknownGenre(i64),
    #[error("word {word_id} does not belong to genre {genre_id}")]
    WordOutsideGenre { word_id: i64, genre_id: i64 },
    #[error("quiz position {cursor} is past the end of a {len}-word quiz")]
    QuizCursorOutOfRange { cursor: usize, len: usize },
    #[error("the quiz is already finished")]
    QuizFinished,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Sqlite(error))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
