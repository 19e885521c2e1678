//! Player (side) representation.

use serde::{Deserialize, Serialize};

/// The two sides of a match. White always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// Returns the other player.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns the stable lowercase name used in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }

    /// Parses the stable name produced by [`Player::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Player::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Returns the back row for this player on a board with `rows` rows.
    ///
    /// White starts on the bottom row, Black on the top row.
    #[inline]
    pub const fn back_row(self, rows: u8) -> u8 {
        match self {
            Player::White => rows - 1,
            Player::Black => 0,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_player() {
        assert_eq!(Player::White.opposite(), Player::Black);
        assert_eq!(Player::Black.opposite(), Player::White);
    }

    #[test]
    fn back_row() {
        assert_eq!(Player::White.back_row(6), 5);
        assert_eq!(Player::White.back_row(10), 9);
        assert_eq!(Player::Black.back_row(12), 0);
    }

    #[test]
    fn names() {
        assert_eq!(Player::from_name("white"), Some(Player::White));
        assert_eq!(Player::from_name(Player::Black.as_str()), Some(Player::Black));
        assert_eq!(Player::from_name("White"), None);
    }

    #[test]
    fn serde_casing() {
        assert_eq!(serde_json::to_string(&Player::White).unwrap(), "\"white\"");
        let parsed: Player = serde_json::from_str("\"black\"").unwrap();
        assert_eq!(parsed, Player::Black);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Player::White), "White");
        assert_eq!(format!("{}", Player::Black), "Black");
    }
}
