use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::StorageError;
use crate::store::schema::{
    CREATE_TABLES, ConfidenceFilter, EXPORT_VERSION, Genre, GenreExport, Snapshot, Word,
    WordExport,
};

type Result<T> = std::result::Result<T, StorageError>;

const WORD_COLUMNS: &str = "id, genre_id, word, details, confidence";

/// Genres and words in a local SQLite file. Every mutating call commits
/// before it returns.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!(path = %path.display(), "opening record store");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(Self { conn })
    }

    /// Release the connection, reporting any error SQLite raises while closing.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }

    pub fn add_genre(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO genres (name) VALUES (?1)", params![name])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name, "added genre");
        Ok(id)
    }

    /// Rename a genre. Missing ids are ignored.
    pub fn edit_genre(&self, id: i64, name: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("UPDATE genres SET name = ?1 WHERE id = ?2", params![name, id])?;
        tracing::debug!(id, name, changed, "edited genre");
        Ok(())
    }

    /// Delete a genre and all of its words as one transaction.
    pub fn delete_genre(&self, id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let words = tx.execute("DELETE FROM words WHERE genre_id = ?1", params![id])?;
        tx.execute("DELETE FROM genres WHERE id = ?1", params![id])?;
        tx.commit()?;
        tracing::debug!(id, words, "deleted genre");
        Ok(())
    }

    pub fn genres(&self) -> Result<Vec<Genre>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM genres ORDER BY id")?;
        let genres = stmt
            .query_map([], genre_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(genres)
    }

    pub fn genre(&self, id: i64) -> Result<Option<Genre>> {
        let genre = self
            .conn
            .query_row(
                "SELECT id, name FROM genres WHERE id = ?1",
                params![id],
                genre_from_row,
            )
            .optional()?;
        Ok(genre)
    }

    /// Insert a word under an existing genre.
    pub fn add_word(
        &self,
        genre_id: i64,
        word: &str,
        details: &str,
        confidence: bool,
    ) -> Result<i64> {
        if self.genre(genre_id)?.is_none() {
            return Err(StorageError::UnknownGenre(genre_id));
        }
        self.conn.execute(
            "INSERT INTO words (genre_id, word, details, confidence) VALUES (?1, ?2, ?3, ?4)",
            params![genre_id, word, details, confidence],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, genre_id, word, "added word");
        Ok(id)
    }

    /// Update a word's text. Confidence and genre are left alone.
    pub fn edit_word(&self, id: i64, word: &str, details: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE words SET word = ?1, details = ?2 WHERE id = ?3",
            params![word, details, id],
        )?;
        tracing::debug!(id, word, changed, "edited word");
        Ok(())
    }

    pub fn delete_word(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM words WHERE id = ?1", params![id])?;
        tracing::debug!(id, "deleted word");
        Ok(())
    }

    pub fn words(&self, genre_id: i64) -> Result<Vec<Word>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE genre_id = ?1 ORDER BY id"
        ))?;
        let words = stmt
            .query_map(params![genre_id], word_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
    }

    pub fn word(&self, id: i64) -> Result<Option<Word>> {
        let word = self
            .conn
            .query_row(
                &format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?1"),
                params![id],
                word_from_row,
            )
            .optional()?;
        Ok(word)
    }

    pub fn update_word_confidence(&self, id: i64, confidence: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE words SET confidence = ?1 WHERE id = ?2",
            params![confidence, id],
        )?;
        tracing::debug!(id, confidence, "updated word confidence");
        Ok(())
    }

    pub fn filter_by_confidence(&self, genre_id: i64, confidence: bool) -> Result<Vec<Word>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE genre_id = ?1 AND confidence = ?2 ORDER BY id"
        ))?;
        let words = stmt
            .query_map(params![genre_id, confidence], word_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
    }

    /// The words of a genre a word list shows under `filter`.
    pub fn words_matching(&self, genre_id: i64, filter: ConfidenceFilter) -> Result<Vec<Word>> {
        match filter.confidence() {
            None => self.words(genre_id),
            Some(confidence) => self.filter_by_confidence(genre_id, confidence),
        }
    }

    pub fn export_snapshot(&self) -> Result<Snapshot> {
        let mut genres = Vec::new();
        for genre in self.genres()? {
            let words = self
                .words(genre.id)?
                .into_iter()
                .map(|w| WordExport {
                    word: w.word,
                    details: w.details,
                    confidence: w.confidence,
                })
                .collect();
            genres.push(GenreExport {
                name: genre.name,
                words,
            });
        }
        Ok(Snapshot {
            tangocho_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            genres,
        })
    }

    /// Append every genre and word of a snapshot. Either all of it lands or
    /// none of it does.
    pub fn import_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        if snapshot.tangocho_export_version != EXPORT_VERSION {
            return Err(StorageError::UnsupportedSnapshot {
                found: snapshot.tangocho_export_version,
                expected: EXPORT_VERSION,
            });
        }

        let tx = self.conn.unchecked_transaction()?;
        for genre in &snapshot.genres {
            tx.execute("INSERT INTO genres (name) VALUES (?1)", params![genre.name])?;
            let genre_id = tx.last_insert_rowid();
            for word in &genre.words {
                tx.execute(
                    "INSERT INTO words (genre_id, word, details, confidence) VALUES (?1, ?2, ?3, ?4)",
                    params![genre_id, word.word, word.details, word.confidence],
                )?;
            }
        }
        tx.commit()?;
        tracing::info!(genres = snapshot.genres.len(), "imported snapshot");
        Ok(())
    }
}

fn genre_from_row(row: &Row<'_>) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
    })
}

fn word_from_row(row: &Row<'_>) -> rusqlite::Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        genre_id: row.get(1)?,
        word: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        details: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        confidence: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
    })
}
