//! Finished-game records and the sink they are offered to.

use chrono::{DateTime, Utc};
use scrum_core::{PieceKind, Player};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// A finished game, produced once when a Product Owner is captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The player whose piece captured the Product Owner.
    pub winner: Player,
    /// Kind of the capturing piece.
    pub piece_kind: PieceKind,
    /// When the capture happened.
    pub timestamp: DateTime<Utc>,
}

impl GameRecord {
    /// Creates a record stamped with a fresh id and the current time.
    pub fn new(winner: Player, piece_kind: PieceKind) -> Self {
        GameRecord {
            id: Uuid::new_v4(),
            winner,
            piece_kind,
            timestamp: Utc::now(),
        }
    }
}

/// Error returned by a [`RecordSink`] that could not accept a record.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink has shut down and accepts no more records.
    #[error("record sink is closed")]
    Closed,
    /// The sink rejected the record.
    #[error("record sink failed: {0}")]
    Failed(String),
}

/// Receiver for finished-game records.
///
/// `offer` is called from inside a move and must return promptly; slow work
/// such as writing to storage belongs on another task. Whatever it returns,
/// the match has already finished.
pub trait RecordSink: Send + Sync {
    fn offer(&self, record: &GameRecord) -> Result<(), SinkError>;
}

/// A sink that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<GameRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record offered so far.
    pub fn records(&self) -> Vec<GameRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl RecordSink for MemorySink {
    fn offer(&self, record: &GameRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|e| SinkError::Failed(e.to_string()))?
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_unique_id() {
        let a = GameRecord::new(Player::White, PieceKind::Developer);
        let b = GameRecord::new(Player::White, PieceKind::Developer);
        assert_ne!(a.id, b.id);
        assert_eq!(a.winner, Player::White);
        assert_eq!(a.piece_kind, PieceKind::Developer);
    }

    #[test]
    fn record_serializes_with_canonical_names() {
        let record = GameRecord::new(Player::Black, PieceKind::ProductOwner);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["winner"], "black");
        assert_eq!(json["piece_kind"], "product-owner");
        let back: GameRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn memory_sink_collects() {
        let sink = MemorySink::new();
        let record = GameRecord::new(Player::White, PieceKind::Designer);
        sink.offer(&record).unwrap();
        assert_eq!(sink.records(), vec![record]);
    }
}
