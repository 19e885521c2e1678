//! Match state machine.
//!
//! A [`Match`] owns the board, whose turn it is and the match phase:
//! - `Setup` until [`Match::start`] is called
//! - `InProgress` while moves are accepted
//! - `Finished` once a Product Owner is captured; nothing changes afterwards
//!
//! Gameplay problems are returned as [`Rejection`] values or [`Advisory`]
//! notes and never alter the state.

use crate::movegen::{legal_moves, TargetSet};
use crate::record::{GameRecord, RecordSink};
use scrum_core::{Board, Dimensions, InvalidDimensions, Piece, PieceKind, Player, Position};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Match lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Phase {
    Setup,
    InProgress,
    Finished { winner: Player },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::InProgress => write!(f, "in progress"),
            Phase::Finished { winner } => write!(f, "finished ({} wins)", winner),
        }
    }
}

/// Why a start or move request was refused. The match is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Moves are not accepted before the match starts.
    #[error("the match has not started")]
    NotStarted,
    /// `start` was called on a match already in progress.
    #[error("the match has already started")]
    AlreadyStarted,
    /// The match is over.
    #[error("the match is finished")]
    MatchFinished,
    /// There is no piece on the origin cell.
    #[error("no piece at {0}")]
    EmptyOrigin(Position),
    /// The origin piece belongs to the player not on move.
    #[error("it is {turn}'s turn")]
    NotPlayersTurn { turn: Player },
    /// The destination is not among the piece's legal targets.
    #[error("{to} is not a legal target from {from}")]
    IllegalTarget { from: Position, to: Position },
}

/// Guidance for the presentation layer after a selection that yielded nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum Advisory {
    /// The selected piece belongs to the side not on move.
    NotPlayersTurn { turn: Player },
    /// Pieces can only be selected while the match is in progress.
    MatchNotInProgress { phase: Phase },
}

/// Result of [`Match::select_piece`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Cells the selected piece can move to. Empty when nothing was selected.
    pub targets: TargetSet,
    /// Set when the selection was refused.
    pub advisory: Option<Advisory>,
}

impl Selection {
    fn refused(advisory: Option<Advisory>) -> Self {
        Selection {
            targets: TargetSet::new(),
            advisory,
        }
    }
}

/// An accepted move in match history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    /// The opposing piece removed from `to`, if any.
    pub captured: Option<Piece>,
}

/// Result of an accepted [`Match::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub played: PlayedMove,
    /// Set when this move captured a Product Owner and ended the match.
    pub winner: Option<Player>,
}

/// Read-only view of a match for polling callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub board: Board,
    pub turn: Player,
    pub phase: Phase,
    pub advisory: Option<Advisory>,
    /// Number of accepted moves.
    pub ply: usize,
    /// Incremented on every start, selection and move request.
    pub revision: u64,
}

/// A single match between White and Black.
#[derive(Clone)]
pub struct Match {
    board: Board,
    turn: Player,
    phase: Phase,
    history: Vec<PlayedMove>,
    advisory: Option<Advisory>,
    record: Option<GameRecord>,
    revision: u64,
    sink: Option<Arc<dyn RecordSink>>,
}

impl Match {
    /// Creates a match on a `rows x cols` board with the starting layout.
    ///
    /// Fails unless the size is one of [`Dimensions::ALLOWED`].
    pub fn new(rows: u8, cols: u8) -> Result<Self, InvalidDimensions> {
        let dims = Dimensions::new(rows, cols)?;
        Ok(Self::from_board(Board::standard(dims)))
    }

    /// Creates a match in `Setup` from a custom board, White to move.
    pub fn from_board(board: Board) -> Self {
        Match {
            board,
            turn: Player::White,
            phase: Phase::Setup,
            history: Vec::new(),
            advisory: None,
            record: None,
            revision: 0,
            sink: None,
        }
    }

    /// Attaches the sink that receives the [`GameRecord`] when the match ends.
    pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Returns a fresh match in `Setup` on `dims` with the starting layout,
    /// reporting to the same sink as this one. This match is left as it is.
    pub fn rematch(&self, dims: Dimensions) -> Match {
        let mut next = Match::from_board(Board::standard(dims));
        next.sink = self.sink.clone();
        next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dimensions(&self) -> Dimensions {
        self.board.dimensions()
    }

    /// The player on move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the winner once the match is finished.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// The advisory left by the most recent selection, cleared by the next
    /// selection or accepted move.
    pub fn advisory(&self) -> Option<Advisory> {
        self.advisory
    }

    pub fn move_history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// The record produced when the match finished.
    pub fn record(&self) -> Option<&GameRecord> {
        self.record.as_ref()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.clone(),
            turn: self.turn,
            phase: self.phase,
            advisory: self.advisory,
            ply: self.history.len(),
            revision: self.revision,
        }
    }

    /// Moves the match from `Setup` to `InProgress`.
    pub fn start(&mut self) -> Result<(), Rejection> {
        self.revision += 1;
        match self.phase {
            Phase::Setup => {
                self.phase = Phase::InProgress;
                tracing::info!(dimensions = %self.dimensions(), "match started");
                Ok(())
            }
            Phase::InProgress => {
                tracing::warn!("start requested for a match already in progress");
                Err(Rejection::AlreadyStarted)
            }
            Phase::Finished { .. } => {
                tracing::warn!("start requested for a finished match");
                Err(Rejection::MatchFinished)
            }
        }
    }

    /// Returns the legal targets of the piece at `at` if it belongs to the
    /// player on move.
    pub fn select_piece(&mut self, at: Position) -> Selection {
        self.revision += 1;

        let selection = if self.phase != Phase::InProgress {
            Selection::refused(Some(Advisory::MatchNotInProgress { phase: self.phase }))
        } else {
            match self.board.get(at) {
                None => Selection::refused(None),
                Some(piece) if piece.owner != self.turn => {
                    Selection::refused(Some(Advisory::NotPlayersTurn { turn: self.turn }))
                }
                Some(piece) => Selection {
                    targets: legal_moves(piece, at, &self.board),
                    advisory: None,
                },
            }
        };

        self.advisory = selection.advisory;
        selection
    }

    /// Moves the piece on `from` to `to` if that is a legal move for the
    /// player on move.
    ///
    /// An opposing piece on `to` is captured. Capturing a Product Owner
    /// finishes the match in the mover's favour; the move is still applied and
    /// the turn still passes.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, Rejection> {
        self.revision += 1;
        let result = self.try_apply(from, to);
        if let Err(rejection) = &result {
            tracing::debug!(%from, %to, %rejection, "move rejected");
        }
        result
    }

    fn try_apply(&mut self, from: Position, to: Position) -> Result<MoveOutcome, Rejection> {
        match self.phase {
            Phase::Setup => return Err(Rejection::NotStarted),
            Phase::Finished { .. } => return Err(Rejection::MatchFinished),
            Phase::InProgress => {}
        }

        let piece = self.board.get(from).ok_or(Rejection::EmptyOrigin(from))?;
        if piece.owner != self.turn {
            return Err(Rejection::NotPlayersTurn { turn: self.turn });
        }
        if !legal_moves(piece, from, &self.board).contains(to) {
            return Err(Rejection::IllegalTarget { from, to });
        }

        let captured = self
            .board
            .relocate(from, to)
            .map_err(|_| Rejection::IllegalTarget { from, to })?;

        let played = PlayedMove {
            piece,
            from,
            to,
            captured,
        };
        self.history.push(played);
        self.advisory = None;
        self.turn = self.turn.opposite();

        let winner = match captured {
            Some(victim) if victim.kind == PieceKind::ProductOwner => {
                self.finish(piece);
                Some(piece.owner)
            }
            _ => None,
        };

        Ok(MoveOutcome { played, winner })
    }

    fn finish(&mut self, capturer: Piece) {
        self.phase = Phase::Finished {
            winner: capturer.owner,
        };
        let record = GameRecord::new(capturer.owner, capturer.kind);
        tracing::info!(
            winner = %capturer.owner,
            piece = %capturer.kind,
            plies = self.history.len(),
            "product owner captured, match finished"
        );

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.offer(&record) {
                tracing::warn!(record = %record.id, "failed to hand off game record: {}", e);
            }
        }
        self.record = Some(record);
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("phase", &self.phase)
            .field("ply", &self.history.len())
            .field("revision", &self.revision)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
