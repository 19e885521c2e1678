//! The board grid.

use crate::notation::{self, NotationError};
use crate::{Dimensions, Piece, PieceKind, Player, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a board operation addresses a cell outside the grid.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("position {pos} is outside the {dims} board")]
pub struct OffBoard {
    pub pos: Position,
    pub dims: Dimensions,
}

/// A `rows x cols` grid where each cell is empty or holds one piece.
///
/// Cells are stored row-major from the top-left corner. Serializes as its
/// dimensions plus the compact [notation](crate::notation).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BoardRepr", try_from = "BoardRepr")]
pub struct Board {
    dims: Dimensions,
    cells: Vec<Option<Piece>>,
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    dimensions: Dimensions,
    cells: String,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            cells: board.to_notation(),
            dimensions: board.dims,
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = NotationError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::from_notation(repr.dimensions, &repr.cells)
    }
}

impl Board {
    /// Order in which back-row pieces are laid out from the player's edge.
    pub const BACK_ROW: [PieceKind; 3] = [
        PieceKind::ProductOwner,
        PieceKind::Developer,
        PieceKind::Designer,
    ];

    /// Creates a board with no pieces.
    pub fn empty(dims: Dimensions) -> Self {
        Board {
            dims,
            cells: vec![None; dims.area()],
        }
    }

    /// Creates a board with the starting layout.
    ///
    /// White's back row is the bottom row, filled from the left edge with
    /// [`Board::BACK_ROW`]. Black mirrors it on the top row from the right edge.
    pub fn standard(dims: Dimensions) -> Self {
        let mut board = Board::empty(dims);
        let last_col = dims.cols() - 1;
        for (i, kind) in (0u8..).zip(Self::BACK_ROW) {
            let white = Position::new(i, Player::White.back_row(dims.rows()));
            let black = Position::new(last_col - i, Player::Black.back_row(dims.rows()));
            let (wi, bi) = (board.index(white), board.index(black));
            board.cells[wi] = Some(Piece::new(kind, Player::White));
            board.cells[bi] = Some(Piece::new(kind, Player::Black));
        }
        board
    }

    /// Parses a board from its notation.
    pub fn from_notation(dims: Dimensions, text: &str) -> Result<Self, NotationError> {
        let cells = notation::parse(dims, text)?;
        Ok(Board { dims, cells })
    }

    /// Formats the board in notation.
    pub fn to_notation(&self) -> String {
        notation::format(self.dims, &self.cells)
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        self.dims.rows()
    }

    #[inline]
    pub fn cols(&self) -> u8 {
        self.dims.cols()
    }

    /// Returns true if `pos` lies on the board.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.dims.contains(pos)
    }

    /// Returns the piece at `pos`, or `None` if the cell is empty or off the board.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.dims.index_of(pos).and_then(|i| self.cells[i])
    }

    /// Returns true if `pos` is on the board and holds no piece.
    #[inline]
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.contains(pos) && self.get(pos).is_none()
    }

    /// Places `piece` at `pos`, returning whatever was there before.
    pub fn put(&mut self, pos: Position, piece: Piece) -> Result<Option<Piece>, OffBoard> {
        let i = self.checked_index(pos)?;
        Ok(self.cells[i].replace(piece))
    }

    /// Removes and returns the piece at `pos`.
    pub fn take(&mut self, pos: Position) -> Result<Option<Piece>, OffBoard> {
        let i = self.checked_index(pos)?;
        Ok(self.cells[i].take())
    }

    /// Moves the piece at `from` onto `to`, returning the piece that was
    /// displaced from `to`.
    ///
    /// Moving from an empty cell leaves the board unchanged.
    pub fn relocate(&mut self, from: Position, to: Position) -> Result<Option<Piece>, OffBoard> {
        let src = self.checked_index(from)?;
        let dst = self.checked_index(to)?;
        match self.cells[src].take() {
            Some(piece) => Ok(self.cells[dst].replace(piece)),
            None => Ok(None),
        }
    }

    /// Iterates over occupied cells, row by row from the top.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.dims
            .positions()
            .zip(self.cells.iter())
            .filter_map(|(pos, cell)| cell.map(|piece| (pos, piece)))
    }

    /// Number of pieces owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.owner == player).count()
    }

    /// Finds the first cell holding `piece`.
    pub fn find(&self, piece: Piece) -> Option<Position> {
        self.pieces().find(|&(_, p)| p == piece).map(|(pos, _)| pos)
    }

    fn checked_index(&self, pos: Position) -> Result<usize, OffBoard> {
        self.dims.index_of(pos).ok_or(OffBoard {
            pos,
            dims: self.dims,
        })
    }

    // Only for positions already known to be on the board.
    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.dims.cols() as usize + pos.x as usize
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}, {})", self.dims, self.to_notation())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.cols() {
            write!(f, " {}", Position::new(x, 0).column_label())?;
        }
        writeln!(f)?;
        for y in 0..self.rows() {
            write!(f, "{:>2} ", y)?;
            for x in 0..self.cols() {
                let c = self.get(Position::new(x, y)).map_or('.', Piece::to_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
