//! Background persistence of finished-game records.
//!
//! A [`Recorder`] is the [`RecordSink`] handed to a [`scrum_engine::Match`].
//! Offering a record only queues it; a worker task owns the storage writes so
//! that a busy database never stalls a move.

use crate::retry::{with_backoff, RetryPolicy};
use crate::storage::Storage;
use scrum_engine::{GameRecord, RecordSink, SinkError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// Queue in front of the record store.
#[derive(Debug, Clone)]
pub struct Recorder {
    tx: mpsc::UnboundedSender<GameRecord>,
}

impl Recorder {
    /// Starts the worker task on the current tokio runtime.
    ///
    /// The worker drains the queue until every `Recorder` clone is dropped,
    /// then the returned handle completes.
    pub fn spawn(storage: Arc<Storage>, policy: RetryPolicy) -> (Recorder, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(storage, policy, rx));
        (Recorder { tx }, handle)
    }
}

impl RecordSink for Recorder {
    fn offer(&self, record: &GameRecord) -> Result<(), SinkError> {
        self.tx
            .send(record.clone())
            .map_err(|_| SinkError::Closed)
    }
}

/// Runs a blocking `session` that is handed its own [`Recorder`].
///
/// The recorder queue is drained before this returns, whatever the session
/// returned, so a session that fails after a win still has its record saved.
pub async fn run_recorded<T, F>(
    storage: Arc<Storage>,
    policy: RetryPolicy,
    session: F,
) -> Result<T, JoinError>
where
    F: FnOnce(Recorder) -> T + Send + 'static,
    T: Send + 'static,
{
    let (recorder, handle) = Recorder::spawn(storage, policy);
    let outcome = tokio::task::spawn_blocking(move || session(recorder)).await;
    let drained = handle.await;
    let value = outcome?;
    drained?;
    Ok(value)
}

async fn run_worker(
    storage: Arc<Storage>,
    policy: RetryPolicy,
    mut rx: mpsc::UnboundedReceiver<GameRecord>,
) {
    while let Some(record) = rx.recv().await {
        match with_backoff(&policy, || storage.save_record(&record)).await {
            Ok(()) => tracing::info!(id = %record.id, winner = %record.winner, "game record saved"),
            Err(e) => tracing::error!(id = %record.id, "failed to save game record: {}", e),
        }
    }
    tracing::debug!("recorder queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrum_core::{PieceKind, Player};

    fn storage() -> Arc<Storage> {
        Arc::new(Storage::open(":memory:").unwrap())
    }

    #[tokio::test]
    async fn test_offered_records_are_stored() {
        let storage = storage();
        let (recorder, handle) = Recorder::spawn(storage.clone(), RetryPolicy::default());

        let first = GameRecord::new(Player::White, PieceKind::Developer);
        let second = GameRecord::new(Player::Black, PieceKind::Designer);
        recorder.offer(&first).unwrap();
        recorder.offer(&second).unwrap();
        drop(recorder);
        handle.await.unwrap();

        assert_eq!(storage.count().unwrap(), 2);
        assert_eq!(storage.get_record(&first.id).unwrap(), Some(first));
        assert_eq!(storage.get_record(&second.id).unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_duplicate_is_logged_not_fatal() {
        let storage = storage();
        let (recorder, handle) = Recorder::spawn(storage.clone(), RetryPolicy::default());

        let record = GameRecord::new(Player::White, PieceKind::ProductOwner);
        let later = GameRecord::new(Player::Black, PieceKind::Developer);
        recorder.offer(&record).unwrap();
        recorder.offer(&record).unwrap();
        recorder.offer(&later).unwrap();
        drop(recorder);
        handle.await.unwrap();

        assert_eq!(storage.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_offer_after_worker_stops_is_closed() {
        let (recorder, handle) = Recorder::spawn(storage(), RetryPolicy::default());
        handle.abort();
        let _ = handle.await;

        let result = recorder.offer(&GameRecord::new(Player::White, PieceKind::Designer));
        assert!(matches!(result, Err(SinkError::Closed)));
    }

    #[tokio::test]
    async fn test_failed_session_still_saves_its_record() {
        let storage = storage();
        let record = GameRecord::new(Player::Black, PieceKind::Designer);
        let offered = record.clone();

        let result = run_recorded(storage.clone(), RetryPolicy::default(), move |recorder| {
            recorder.offer(&offered).unwrap();
            Err::<(), _>(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        })
        .await
        .unwrap();

        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::BrokenPipe);
        assert_eq!(storage.get_record(&record.id).unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_match_win_reaches_storage() {
        use scrum_core::{Board, Dimensions, Position};
        use scrum_engine::Match;

        let storage = storage();
        let (recorder, handle) = Recorder::spawn(storage.clone(), RetryPolicy::default());

        let board = Board::from_notation(Dimensions::DEFAULT, "2p3/2D3/6/6/6/P4d").unwrap();
        let mut game = Match::from_board(board).with_sink(Arc::new(recorder));
        game.start().unwrap();
        let outcome = game
            .apply_move(Position::new(2, 1), Position::new(2, 0))
            .unwrap();
        assert_eq!(outcome.winner, Some(Player::White));
        drop(game);
        handle.await.unwrap();

        let records = storage.list_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].winner, Player::White);
        assert_eq!(records[0].piece_kind, PieceKind::Developer);
    }
}
