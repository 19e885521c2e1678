//! Piece representation.

use crate::Player;
use serde::{Deserialize, Serialize};

/// The three kinds of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PieceKind {
    /// Slides up to three cells in any of the eight directions.
    Developer,
    /// Leaps like a knight.
    Designer,
    /// Steps one cell in any direction. Capturing it ends the match.
    ProductOwner,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 3] = [
        PieceKind::Developer,
        PieceKind::Designer,
        PieceKind::ProductOwner,
    ];

    /// Returns the lowercase notation letter for this kind.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Developer => 'd',
            PieceKind::Designer => 's',
            PieceKind::ProductOwner => 'p',
        }
    }

    /// Returns the stable lowercase name used in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceKind::Developer => "developer",
            PieceKind::Designer => "designer",
            PieceKind::ProductOwner => "product-owner",
        }
    }

    /// Parses the stable name produced by [`PieceKind::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        PieceKind::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Developer => "Developer",
            PieceKind::Designer => "Designer",
            PieceKind::ProductOwner => "Product Owner",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board: a kind and the player that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, owner: Player) -> Self {
        Piece { kind, owner }
    }

    /// Returns the notation character: uppercase for White, lowercase for Black.
    pub const fn to_char(self) -> char {
        let c = self.kind.letter();
        match self.owner {
            Player::White => c.to_ascii_uppercase(),
            Player::Black => c,
        }
    }

    /// Parses a notation character into a piece.
    pub const fn from_char(c: char) -> Option<Self> {
        let owner = if c.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'd' => PieceKind::Developer,
            's' => PieceKind::Designer,
            'p' => PieceKind::ProductOwner,
            _ => return None,
        };
        Some(Piece { kind, owner })
    }

    /// Returns true if `other` belongs to the opposing player.
    #[inline]
    pub fn is_opponent_of(self, other: Piece) -> bool {
        self.owner != other.owner
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.owner, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_char() {
        let dev = Piece::new(PieceKind::Developer, Player::White);
        assert_eq!(dev.to_char(), 'D');
        let po = Piece::new(PieceKind::ProductOwner, Player::Black);
        assert_eq!(po.to_char(), 'p');
        let designer = Piece::new(PieceKind::Designer, Player::White);
        assert_eq!(designer.to_char(), 'S');
    }

    #[test]
    fn piece_from_char() {
        assert_eq!(
            Piece::from_char('S'),
            Some(Piece::new(PieceKind::Designer, Player::White))
        );
        assert_eq!(
            Piece::from_char('d'),
            Some(Piece::new(PieceKind::Developer, Player::Black))
        );
        assert_eq!(Piece::from_char('k'), None);
        assert_eq!(Piece::from_char('3'), None);
    }

    #[test]
    fn kind_names() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_name("ProductOwner"), None);
    }

    #[test]
    fn serde_matches_storage_names() {
        for kind in PieceKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn opponents() {
        let white = Piece::new(PieceKind::Developer, Player::White);
        let black = Piece::new(PieceKind::Designer, Player::Black);
        assert!(white.is_opponent_of(black));
        assert!(!white.is_opponent_of(white));
    }

    #[test]
    fn display() {
        let po = Piece::new(PieceKind::ProductOwner, Player::Black);
        assert_eq!(po.to_string(), "Black Product Owner");
    }
}
