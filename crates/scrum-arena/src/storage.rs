//! SQLite storage for finished game records.
//!
//! Records are written once, when a match ends, and can afterwards be listed,
//! fetched or deleted. They are never updated.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use scrum_core::{PieceKind, Player};
use scrum_engine::GameRecord;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite call failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A previous holder of the connection panicked.
    #[error("database connection lock poisoned")]
    Poisoned,
    /// A stored row could not be decoded into a record.
    #[error("stored record {id} is malformed: {reason}")]
    Corrupt { id: String, reason: String },
    /// Retries were exhausted on a transient failure.
    #[error("storage unavailable after {attempts} attempts: {source}")]
    Unavailable {
        attempts: u32,
        source: Box<StorageError>,
    },
}

impl StorageError {
    /// Returns true for failures that may clear up on their own, such as a
    /// locked or temporarily unopenable database.
    pub fn is_transient(&self) -> bool {
        match self {
            StorageError::Sqlite(e) => matches!(
                e.sqlite_error_code(),
                Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen)
            ),
            _ => false,
        }
    }
}

/// SQLite-backed store for [`GameRecord`]s.
///
/// # Example
///
/// ```ignore
/// let storage = Storage::open("data/scrum-chess.db")?;
/// storage.save_record(&record)?;
/// for record in storage.list_records()? {
///     println!("{} won", record.winner);
/// }
/// ```
pub struct Storage {
    conn: Mutex<Connection>,
}

type Row = (String, String, String, String);

impl Storage {
    /// Opens or creates a SQLite database at the given path.
    ///
    /// The schema is created on first open. Use `:memory:` for a throwaway
    /// database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn()?.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                winner TEXT NOT NULL,
                piece_kind TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_games_created ON games(created_at);
            ",
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Saves a record.
    ///
    /// # Errors
    ///
    /// Fails if a record with the same id already exists.
    pub fn save_record(&self, record: &GameRecord) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT INTO games (id, winner, piece_kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            (
                record.id.to_string(),
                record.winner.as_str(),
                record.piece_kind.as_str(),
                record
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
        )?;
        Ok(())
    }

    /// Returns all records, newest first.
    pub fn list_records(&self) -> Result<Vec<GameRecord>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, winner, piece_kind, created_at FROM games
             ORDER BY created_at DESC, id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<Row>, _>>()?;

        rows.into_iter().map(decode).collect()
    }

    /// Fetches one record by id.
    pub fn get_record(&self, id: &Uuid) -> Result<Option<GameRecord>, StorageError> {
        let row: Option<Row> = self
            .conn()?
            .query_row(
                "SELECT id, winner, piece_kind, created_at FROM games WHERE id = ?1",
                [id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        row.map(decode).transpose()
    }

    /// Deletes one record by id. Returns false if no such record existed.
    pub fn delete_record(&self, id: &Uuid) -> Result<bool, StorageError> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM games WHERE id = ?1", [id.to_string()])?;
        Ok(deleted > 0)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, StorageError> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn decode((id, winner, piece_kind, created_at): Row) -> Result<GameRecord, StorageError> {
    let corrupt = |reason: String| StorageError::Corrupt {
        id: id.clone(),
        reason,
    };

    let uuid = Uuid::parse_str(&id).map_err(|e| corrupt(format!("bad id: {}", e)))?;
    let winner =
        Player::from_name(&winner).ok_or_else(|| corrupt(format!("unknown winner '{}'", winner)))?;
    let piece_kind = PieceKind::from_name(&piece_kind)
        .ok_or_else(|| corrupt(format!("unknown piece kind '{}'", piece_kind)))?;
    let timestamp = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| corrupt(format!("bad timestamp: {}", e)))?
        .with_timezone(&Utc);

    Ok(GameRecord {
        id: uuid,
        winner,
        piece_kind,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Helper function to create an in-memory database for testing.
    fn create_test_storage() -> Storage {
        Storage::open(":memory:").expect("Failed to create in-memory storage")
    }

    #[test]
    fn test_open_creates_table() {
        let storage = create_test_storage();
        let exists: i32 = storage
            .conn()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='games'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "games table should exist");
    }

    #[test]
    fn test_save_and_get_record() {
        let storage = create_test_storage();
        let record = GameRecord::new(Player::White, PieceKind::Designer);

        storage.save_record(&record).expect("Failed to save record");

        let loaded = storage
            .get_record(&record.id)
            .expect("Failed to load record")
            .expect("Record should exist");
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_get_unknown_record_returns_none() {
        let storage = create_test_storage();
        assert_eq!(storage.get_record(&Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_records_are_written_once() {
        let storage = create_test_storage();
        let record = GameRecord::new(Player::Black, PieceKind::Developer);
        storage.save_record(&record).unwrap();

        let again = storage.save_record(&record);
        assert!(matches!(again, Err(StorageError::Sqlite(_))));
        assert!(!again.unwrap_err().is_transient());
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_list_newest_first() {
        let storage = create_test_storage();
        let mut older = GameRecord::new(Player::White, PieceKind::Developer);
        older.timestamp -= Duration::minutes(5);
        let newer = GameRecord::new(Player::Black, PieceKind::ProductOwner);

        storage.save_record(&older).unwrap();
        storage.save_record(&newer).unwrap();

        let records = storage.list_records().unwrap();
        assert_eq!(records, vec![newer, older]);
    }

    #[test]
    fn test_delete_record() {
        let storage = create_test_storage();
        let record = GameRecord::new(Player::White, PieceKind::ProductOwner);
        storage.save_record(&record).unwrap();

        assert!(storage.delete_record(&record.id).unwrap());
        assert!(!storage.delete_record(&record.id).unwrap());
        assert!(storage.list_records().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let storage = create_test_storage();
        storage
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO games (id, winner, piece_kind, created_at)
                 VALUES ('not-a-uuid', 'white', 'developer', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        match storage.list_records() {
            Err(StorageError::Corrupt { id, .. }) => assert_eq!(id, "not-a-uuid"),
            other => panic!("Expected Corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.db");
        let record = GameRecord::new(Player::Black, PieceKind::Designer);

        Storage::open(&path).unwrap().save_record(&record).unwrap();

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.get_record(&record.id).unwrap(), Some(record));
    }
}
