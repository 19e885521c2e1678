//! Rules engine and match state machine for Scrum Chess.
//!
//! This crate provides:
//! - [`legal_moves`] - move generation for Developers, Designers and Product Owners
//! - [`Match`] - board ownership, turn order and the match lifecycle
//! - [`GameRecord`] and [`RecordSink`] - the hand-off of finished games to storage
//!
//! # Example
//!
//! ```
//! use scrum_core::Position;
//! use scrum_engine::{Match, Phase};
//!
//! let mut game = Match::new(6, 6).unwrap();
//! game.start().unwrap();
//!
//! let selection = game.select_piece(Position::new(1, 5));
//! println!("Developer can reach {} cells", selection.targets.len());
//!
//! game.apply_move(Position::new(1, 5), Position::new(1, 3)).unwrap();
//! assert_eq!(game.phase(), Phase::InProgress);
//! ```

mod game;
pub mod movegen;
pub mod record;

pub use game::{
    Advisory, Match, MatchSnapshot, MoveOutcome, Phase, PlayedMove, Rejection, Selection,
};
pub use movegen::{legal_moves, TargetSet};
pub use record::{GameRecord, MemorySink, RecordSink, SinkError};
