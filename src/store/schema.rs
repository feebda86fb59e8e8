use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS genres (
        id INTEGER PRIMARY KEY,
        name TEXT
    );
    CREATE TABLE IF NOT EXISTS words (
        id INTEGER PRIMARY KEY,
        genre_id INTEGER,
        word TEXT,
        details TEXT,
        confidence BOOLEAN,
        FOREIGN KEY(genre_id) REFERENCES genres(id)
    );";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub id: i64,
    pub genre_id: i64,
    pub word: String,
    pub details: String,
    pub confidence: bool,
}

/// Which words of a genre a word list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfidenceFilter {
    #[default]
    All,
    Confident,
    NotConfident,
}

impl ConfidenceFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceFilter::All => "all",
            ConfidenceFilter::Confident => "confident",
            ConfidenceFilter::NotConfident => "not confident",
        }
    }

    /// The flag value to filter on, or `None` for every word.
    pub fn confidence(self) -> Option<bool> {
        match self {
            ConfidenceFilter::All => None,
            ConfidenceFilter::Confident => Some(true),
            ConfidenceFilter::NotConfident => Some(false),
        }
    }
}

pub const EXPORT_VERSION: u32 = 1;

/// Whole-notebook export. Ids are not carried: import assigns fresh ones.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub tangocho_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub genres: Vec<GenreExport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreExport {
    pub name: String,
    #[serde(default)]
    pub words: Vec<WordExport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordExport {
    pub word: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub confidence: bool,
}
