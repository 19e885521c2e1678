//! Allowed board sizes.

use crate::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned for a `(rows, cols)` pair outside [`Dimensions::ALLOWED`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid board dimensions {rows}x{cols}: allowed sizes are 6x6, 6x8, 6x12, 12x12 and 10x7")]
pub struct InvalidDimensions {
    pub rows: u8,
    pub cols: u8,
}

/// Board size in rows and columns.
///
/// Only the five sizes in [`Dimensions::ALLOWED`] can be constructed through
/// [`Dimensions::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    rows: u8,
    cols: u8,
}

#[derive(Deserialize)]
struct RawDimensions {
    rows: u8,
    cols: u8,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = InvalidDimensions;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.rows, raw.cols)
    }
}

impl Dimensions {
    /// The allowed `(rows, cols)` pairs.
    pub const ALLOWED: [Dimensions; 5] = [
        Dimensions { rows: 6, cols: 6 },
        Dimensions { rows: 6, cols: 8 },
        Dimensions { rows: 6, cols: 12 },
        Dimensions { rows: 12, cols: 12 },
        Dimensions { rows: 10, cols: 7 },
    ];

    /// The default 6x6 board.
    pub const DEFAULT: Dimensions = Dimensions { rows: 6, cols: 6 };

    /// Validates a `(rows, cols)` pair.
    pub fn new(rows: u8, cols: u8) -> Result<Self, InvalidDimensions> {
        let dims = Dimensions { rows, cols };
        if Self::ALLOWED.contains(&dims) {
            Ok(dims)
        } else {
            Err(InvalidDimensions { rows, cols })
        }
    }

    #[inline]
    pub const fn rows(self) -> u8 {
        self.rows
    }

    #[inline]
    pub const fn cols(self) -> u8 {
        self.cols
    }

    /// Number of cells on the board.
    #[inline]
    pub const fn area(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Returns true if `pos` lies on the board.
    #[inline]
    pub const fn contains(self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Row-major cell index of `pos`, or `None` if it is off the board.
    #[inline]
    pub fn index_of(self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.cols as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Iterates over every position, row by row from the top.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Position::new(x, y)))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_sizes() {
        for (rows, cols) in [(6, 6), (6, 8), (6, 12), (12, 12), (10, 7)] {
            let dims = Dimensions::new(rows, cols).unwrap();
            assert_eq!(dims.rows(), rows);
            assert_eq!(dims.cols(), cols);
        }
    }

    #[test]
    fn rejected_sizes() {
        assert_eq!(
            Dimensions::new(7, 7),
            Err(InvalidDimensions { rows: 7, cols: 7 })
        );
        // Transposed pairs are not allowed either.
        assert!(Dimensions::new(8, 6).is_err());
        assert!(Dimensions::new(7, 10).is_err());
        assert!(Dimensions::new(0, 0).is_err());
    }

    #[test]
    fn contains_and_index() {
        let dims = Dimensions::new(10, 7).unwrap();
        assert!(dims.contains(Position::new(6, 9)));
        assert!(!dims.contains(Position::new(7, 0)));
        assert!(!dims.contains(Position::new(0, 10)));
        assert_eq!(dims.index_of(Position::new(0, 0)), Some(0));
        assert_eq!(dims.index_of(Position::new(2, 1)), Some(9));
        assert_eq!(dims.index_of(Position::new(7, 1)), None);
    }

    #[test]
    fn positions_cover_board() {
        let dims = Dimensions::new(6, 8).unwrap();
        let all: Vec<Position> = dims.positions().collect();
        assert_eq!(all.len(), dims.area());
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[8], Position::new(0, 1));
        assert_eq!(*all.last().unwrap(), Position::new(7, 5));
    }

    #[test]
    fn deserialize_validates() {
        let dims: Dimensions = serde_json::from_str(r#"{"rows":10,"cols":7}"#).unwrap();
        assert_eq!(dims, Dimensions::new(10, 7).unwrap());
        assert!(serde_json::from_str::<Dimensions>(r#"{"rows":7,"cols":7}"#).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Dimensions::new(12, 12).unwrap().to_string(), "12x12");
    }
}
