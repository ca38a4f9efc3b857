//! Move ordering for search.
//!
//! Every candidate gets an additive score; the search then pulls moves out of
//! a [`ScoredMoveList`] best-first with a partial selection sort.

use super::constants::{CAPTURE_SCORE, KILLER1_SCORE, KILLER2_SCORE, MVV_LVA, PV_MOVE_SCORE};
use crate::board::{Move, MoveList, Piece, Position, ScoredMoveList, MAX_PLY};

/// Up to two quiet moves per ply that caused a beta cutoff.
pub(crate) struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[Move::EMPTY; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub fn get(&self, ply: usize) -> [Move; 2] {
        self.slots.get(ply).copied().unwrap_or([Move::EMPTY; 2])
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        if row[0] != mv {
            row[1] = row[0];
            row[0] = mv;
        }
    }

    pub fn reset(&mut self) {
        self.slots = [[Move::EMPTY; 2]; MAX_PLY];
    }
}

/// The piece `mv` captures, if any. A pawn moving diagonally onto an empty
/// square captures en passant.
#[must_use]
pub(crate) fn captured_piece(position: &Position, mv: Move) -> Option<Piece> {
    let them = position.side_to_move().opponent();
    match position.piece_at(mv.to()) {
        Some((color, piece)) if color == them => Some(piece),
        Some(_) => None,
        None => match position.piece_at(mv.from()) {
            Some((_, Piece::Pawn)) if mv.from().file() != mv.to().file() => Some(Piece::Pawn),
            _ => None,
        },
    }
}

/// Ordering score for one move. `hint` is the PV or hash move.
#[must_use]
pub(crate) fn score_move(position: &Position, mv: Move, hint: Move, killers: [Move; 2]) -> i32 {
    let mut score = 0;

    if mv == hint {
        score += PV_MOVE_SCORE;
    }

    let victim = captured_piece(position, mv);
    if let Some(victim) = victim {
        let attacker = position
            .piece_at(mv.from())
            .map_or(0, |(_, piece)| MVV_LVA[piece.index()]);
        score += MVV_LVA[victim.index()] * 10 - attacker + CAPTURE_SCORE;
    }

    if let Some(promo) = mv.promotion() {
        if promo == Piece::Queen {
            score += CAPTURE_SCORE;
        }
        score += MVV_LVA[promo.index()];
    }

    if victim.is_none() {
        if mv == killers[0] {
            score += KILLER1_SCORE;
        } else if mv == killers[1] {
            score += KILLER2_SCORE;
        }
    }

    score
}

/// Score every move in `moves` for best-first selection.
#[must_use]
pub(crate) fn order_moves(
    position: &Position,
    moves: &MoveList,
    hint: Move,
    killers: [Move; 2],
) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        scored.push(mv, score_move(position, mv, hint, killers));
    }
    scored
}
