//! Core types for Scrum Chess.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`], [`PieceKind`] and [`Player`] for piece representation
//! - [`Position`] and [`Dimensions`] for board coordinates and sizes
//! - [`Board`] for the cell grid
//! - board [notation] parsing and formatting

mod board;
mod dimensions;
pub mod notation;
mod piece;
mod player;
mod position;

pub use board::{Board, OffBoard};
pub use dimensions::{Dimensions, InvalidDimensions};
pub use notation::NotationError;
pub use piece::{Piece, PieceKind};
pub use player::Player;
pub use position::{ParsePositionError, Position};
