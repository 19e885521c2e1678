//! Board coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cell on the board. `x` is the column and `y` the row, both 0-based,
/// with `(0, 0)` at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

/// Error returned when a position string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid position '{0}': expected 'x,y'")]
pub struct ParsePositionError(pub String);

impl Position {
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Position { x, y }
    }

    /// Returns the position shifted by `(dx, dy)`, or `None` if either
    /// coordinate would become negative or overflow.
    ///
    /// The result is not bounds-checked against any board.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Position { x, y })
    }

    /// Chebyshev (king-move) distance to `other`.
    #[inline]
    pub fn chebyshev(self, other: Position) -> u8 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Column label as a letter (`a` for x = 0).
    #[inline]
    pub fn column_label(self) -> char {
        (b'a' + self.x) as char
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (x, y) = s.trim().split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<u8>().map_err(|_| err())?;
        let y = y.trim().parse::<u8>().map_err(|_| err())?;
        Ok(Position { x, y })
    }
}
