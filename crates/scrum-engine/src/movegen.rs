//! Move generation.
//!
//! [`legal_moves`] is the single entry point: it dispatches on the piece kind
//! and returns every reachable cell. Moves and captures are not distinguished;
//! a target holding an opposing piece is a capture.

use scrum_core::{Board, Piece, PieceKind, Position};
use serde::Serialize;

/// The eight unit directions, clockwise from north.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Knight-style leap offsets used by the Designer.
pub const LEAPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// How far a Developer slides along a ray.
pub const DEVELOPER_RANGE: u8 = 3;

/// How far a Product Owner steps along a ray.
pub const PRODUCT_OWNER_RANGE: u8 = 1;

/// The set of cells a piece can reach.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetSet {
    targets: Vec<Position>,
}

impl TargetSet {
    /// Upper bound on targets for any piece: 8 rays of 3 cells.
    pub const MAX_TARGETS: usize = DIRECTIONS.len() * DEVELOPER_RANGE as usize;

    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        TargetSet {
            targets: Vec::with_capacity(Self::MAX_TARGETS),
        }
    }

    /// Adds a target.
    #[inline]
    pub fn push(&mut self, pos: Position) {
        debug_assert!(!self.targets.contains(&pos));
        self.targets.push(pos);
    }

    /// Returns the number of targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if there are no targets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns true if `pos` is a target.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.targets.contains(&pos)
    }

    /// Iterates over the targets in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

impl IntoIterator for TargetSet {
    type Item = Position;
    type IntoIter = std::vec::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}

impl std::fmt::Debug for TargetSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.targets.iter()).finish()
    }
}

/// Returns every cell `piece` standing on `from` can move to.
///
/// The board is only read. `from` is expected to be on the board; this is not
/// checked, and only the generated targets are filtered by bounds.
pub fn legal_moves(piece: Piece, from: Position, board: &Board) -> TargetSet {
    let mut targets = TargetSet::new();
    match piece.kind {
        PieceKind::Developer => generate_rays(piece, from, board, DEVELOPER_RANGE, &mut targets),
        PieceKind::Designer => generate_leaps(piece, from, board, &mut targets),
        PieceKind::ProductOwner => {
            generate_rays(piece, from, board, PRODUCT_OWNER_RANGE, &mut targets)
        }
    }
    targets
}

fn generate_rays(piece: Piece, from: Position, board: &Board, range: u8, targets: &mut TargetSet) {
    for (dx, dy) in DIRECTIONS {
        cast_ray(piece, from, (dx, dy), range, board, targets);
    }
}

/// Walks one ray outward from `from` for up to `range` steps.
///
/// Empty cells are targets and the ray continues. The first occupied cell
/// stops the ray; it is a target only if it holds an opponent and either it is
/// adjacent to `from` or the cell just before it on the ray is empty.
pub fn cast_ray(
    piece: Piece,
    from: Position,
    (dx, dy): (i8, i8),
    range: u8,
    board: &Board,
    targets: &mut TargetSet,
) {
    for step in 1..=range as i8 {
        let Some(target) = step_from(from, dx * step, dy * step, board) else {
            break;
        };

        match board.get(target) {
            None => targets.push(target),
            Some(occupant) if piece.is_opponent_of(occupant) => {
                let landing_clear = step == 1
                    || step_from(from, dx * (step - 1), dy * (step - 1), board)
                        .is_some_and(|behind| board.is_vacant(behind));
                if landing_clear {
                    targets.push(target);
                }
                break;
            }
            Some(_) => break,
        }
    }
}

fn generate_leaps(piece: Piece, from: Position, board: &Board, targets: &mut TargetSet) {
    for (dx, dy) in LEAPS {
        let Some(target) = step_from(from, dx, dy, board) else {
            continue;
        };
        match board.get(target) {
            Some(occupant) if !piece.is_opponent_of(occupant) => {}
            _ => targets.push(target),
        }
    }
}

#[inline]
fn step_from(from: Position, dx: i8, dy: i8, board: &Board) -> Option<Position> {
    from.offset(dx, dy).filter(|&pos| board.contains(pos))
}
