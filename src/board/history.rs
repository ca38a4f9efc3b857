use super::error::MoveParseError;
use super::{Move, Position};

/// The chain of positions reached in a game, oldest first.
///
/// Snapshots live in a vector with a length cursor: `push` writes at the
/// cursor and `pop` moves it back, so the search can explore a line and
/// unwind it without reallocating. The history is never empty.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    positions: Vec<Position>,
    len: usize,
}

impl PositionHistory {
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut positions = Vec::with_capacity(256);
        positions.push(start);
        PositionHistory { positions, len: 1 }
    }

    /// Build a history from a start position and a sequence of moves in long
    /// algebraic notation.
    pub fn from_moves<I, S>(start: Position, moves: I) -> Result<Self, MoveParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut history = PositionHistory::new(start);
        for notation in moves {
            history.play(notation.as_ref())?;
        }
        Ok(history)
    }

    /// The newest position.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Position {
        &self.positions[self.len - 1]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All live positions, oldest first.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions[..self.len]
    }

    #[inline]
    pub fn push(&mut self, position: Position) {
        if self.len < self.positions.len() {
            self.positions[self.len] = position;
        } else {
            self.positions.push(position);
        }
        self.len += 1;
    }

    /// Apply `mv` to the newest position and push the result.
    #[inline]
    pub fn push_move(&mut self, mv: Move) {
        let next = self.current().apply_move(mv);
        self.push(next);
    }

    /// Drop the newest position. The starting position is never dropped.
    #[inline]
    pub fn pop(&mut self) {
        if self.len > 1 {
            self.len -= 1;
        }
    }

    /// Parse a long-algebraic move against the newest position and push it.
    pub fn play(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let mv = self.current().parse_move(notation)?;
        self.push_move(mv);
        Ok(mv)
    }

    /// How many earlier positions share the newest position's hash.
    ///
    /// The whole chain is scanned, so snapshots pushed with their own clocks
    /// still count.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        let current = self.current();
        self.positions[..self.len - 1]
            .iter()
            .filter(|earlier| earlier.hash() == current.hash())
            .count()
    }
}

impl Default for PositionHistory {
    fn default() -> Self {
        PositionHistory::new(Position::new())
    }
}
