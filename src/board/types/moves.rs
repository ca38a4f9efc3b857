//! Move types and move lists.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const EMPTY_BIT: u16 = 1 << 15;

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: promotion piece (0 = none, 1 = knight, 2 = bishop, 3 = rook, 4 = queen)
/// - bit 15:     set only on the empty move
///
/// Equality is structural over all fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    /// The "no move" sentinel
    pub const EMPTY: Move = Move(EMPTY_BIT);

    /// Create a move without promotion
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move(from.index() as u16 | ((to.index() as u16) << 6))
    }

    /// Create a promotion move
    #[inline]
    #[must_use]
    pub const fn with_promotion(from: Square, to: Square, piece: Piece) -> Self {
        let code = match piece {
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            _ => 4,
        };
        Move(Move::new(from, to).0 | (code << 12))
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        if self.is_empty() {
            return None;
        }
        match (self.0 >> 12) & 0x7 {
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 & EMPTY_BIT != 0
    }

    /// Raw 16-bit value, as stored in the transposition table
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::EMPTY
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Move(empty)");
        }
        write!(f, "Move({self})")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 128;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [Move::EMPTY; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.as_slice().first().copied()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation.
#[derive(Clone, Debug)]
pub(crate) struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: Move::EMPTY,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    /// Partial sort: find the best move from index `start` onwards and swap it to position `start`.
    /// Returns the move at position `start` after swapping (the best remaining move).
    #[inline]
    pub fn pick_best(&mut self, start: usize) -> Option<ScoredMove> {
        if start >= self.len {
            return None;
        }

        let mut best_idx = start;
        let mut best_score = self.moves[start].score;
        for i in (start + 1)..self.len {
            if self.moves[i].score > best_score {
                best_score = self.moves[i].score;
                best_idx = i;
            }
        }

        if best_idx != start {
            self.moves.swap(start, best_idx);
        }

        Some(self.moves[start])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_move_is_distinct() {
        let a1a1 = Move::new(Square(0, 0), Square(0, 0));
        assert_ne!(a1a1, Move::EMPTY);
        assert!(Move::EMPTY.is_empty());
        assert!(!a1a1.is_empty());
        assert_eq!(Move::EMPTY.promotion(), None);
        assert_eq!(Move::default(), Move::EMPTY);
    }

    #[test]
    fn test_promotion_encoding() {
        let from = Square(6, 0);
        let to = Square(7, 0);
        for piece in [Piece::Queen, Piece::Knight, Piece::Bishop, Piece::Rook] {
            let mv = Move::with_promotion(from, to, piece);
            assert_eq!(mv.from(), from);
            assert_eq!(mv.to(), to);
            assert_eq!(mv.promotion(), Some(piece));
        }
        assert_ne!(
            Move::with_promotion(from, to, Piece::Queen),
            Move::with_promotion(from, to, Piece::Knight)
        );
        assert_eq!(Move::with_promotion(from, to, Piece::Queen).to_string(), "a7a8q");
    }

    #[test]
    fn test_pick_best_selects_in_descending_order() {
        let mut list = ScoredMoveList::new();
        let moves = [
            Move::new(Square(1, 0), Square(2, 0)),
            Move::new(Square(1, 1), Square(2, 1)),
            Move::new(Square(1, 2), Square(2, 2)),
        ];
        list.push(moves[0], 5);
        list.push(moves[1], 50);
        list.push(moves[2], 10);

        assert_eq!(list.pick_best(0).map(|s| s.mv), Some(moves[1]));
        assert_eq!(list.pick_best(1).map(|s| s.mv), Some(moves[2]));
        assert_eq!(list.pick_best(2).map(|s| s.mv), Some(moves[0]));
        assert!(list.pick_best(3).is_none());
    }
}
