use crate::zobrist::ZOBRIST;

use super::{Color, Move, Piece, Position, Square};

impl Position {
    /// Hash of the full position computed from scratch.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash: u64 = 0;

        for rank in 0..8 {
            for file in 0..8 {
                if let Some((color, piece)) = self.grid[rank][file] {
                    hash ^= ZOBRIST.piece(color, piece, Square(rank, file));
                }
            }
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side();
        }

        for color in Color::BOTH {
            for kingside in [true, false] {
                if self.castling_rights.has(color, kingside) {
                    hash ^= ZOBRIST.castling(color, kingside);
                }
            }
            if let Some(file) = self.en_passant[color.index()] {
                hash ^= ZOBRIST.en_passant(color, usize::from(file));
            }
        }

        hash
    }

    /// Return the position reached by playing `mv`.
    ///
    /// `mv` must be legal here; if its origin square is empty the position is
    /// returned unchanged.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Position {
        let mut next = *self;
        next.make_move(mv);
        next
    }

    fn make_move(&mut self, mv: Move) {
        if mv.is_empty() {
            return;
        }
        let from = mv.from();
        let to = mv.to();
        let Some((color, piece)) = self.piece_at(from) else {
            return;
        };

        let mut hash = self.hash;

        for c in Color::BOTH {
            if let Some(file) = self.en_passant[c.index()].take() {
                hash ^= ZOBRIST.en_passant(c, usize::from(file));
            }
        }

        let captured = self.piece_at(to);
        if let Some((cap_color, cap_piece)) = captured {
            self.remove_piece(to, cap_color, cap_piece);
            hash ^= ZOBRIST.piece(cap_color, cap_piece, to);
            self.phase -= cap_piece.phase_weight();
            if cap_piece == Piece::Rook {
                hash ^= self.clear_castling_right_at(cap_color, to);
            }
        }

        self.remove_piece(from, color, piece);
        hash ^= ZOBRIST.piece(color, piece, from);
        self.set_piece(to, color, piece);
        hash ^= ZOBRIST.piece(color, piece, to);

        let mut irreversible = captured.is_some();

        match piece {
            Piece::Pawn => {
                irreversible = true;
                if to.rank() == color.opponent().back_rank() {
                    let promoted = mv.promotion().unwrap_or(Piece::Queen);
                    self.remove_piece(to, color, Piece::Pawn);
                    hash ^= ZOBRIST.piece(color, Piece::Pawn, to);
                    self.set_piece(to, color, promoted);
                    hash ^= ZOBRIST.piece(color, promoted, to);
                    self.phase += promoted.phase_weight();
                } else if from.rank().abs_diff(to.rank()) == 2 {
                    self.en_passant[color.index()] = Some(from.file() as u8);
                    hash ^= ZOBRIST.en_passant(color, from.file());
                } else if from.file() != to.file() && captured.is_none() {
                    // en passant: the passed pawn sits beside the origin
                    let passed = Square(from.rank(), to.file());
                    if let Some((pass_color, pass_piece)) = self.piece_at(passed) {
                        self.remove_piece(passed, pass_color, pass_piece);
                        hash ^= ZOBRIST.piece(pass_color, pass_piece, passed);
                        self.phase -= pass_piece.phase_weight();
                    }
                }
            }
            Piece::King => {
                if from.file().abs_diff(to.file()) == 2 {
                    let rank = from.rank();
                    let (rook_from, rook_to) = if to.file() > from.file() {
                        (Square(rank, 7), Square(rank, 5))
                    } else {
                        (Square(rank, 0), Square(rank, 3))
                    };
                    if self.piece_at(rook_from) == Some((color, Piece::Rook)) {
                        self.remove_piece(rook_from, color, Piece::Rook);
                        hash ^= ZOBRIST.piece(color, Piece::Rook, rook_from);
                        self.set_piece(rook_to, color, Piece::Rook);
                        hash ^= ZOBRIST.piece(color, Piece::Rook, rook_to);
                    }
                }
                hash ^= self.clear_castling_right(color, true);
                hash ^= self.clear_castling_right(color, false);
            }
            Piece::Rook => {
                hash ^= self.clear_castling_right_at(color, from);
            }
            _ => {}
        }

        if irreversible {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.side_to_move = self.side_to_move.opponent();
        hash ^= ZOBRIST.side();
        self.hash = hash;
    }

    /// Drop one castling right; returns the hash delta.
    fn clear_castling_right(&mut self, color: Color, kingside: bool) -> u64 {
        if self.castling_rights.has(color, kingside) {
            self.castling_rights.remove(color, kingside);
            ZOBRIST.castling(color, kingside)
        } else {
            0
        }
    }

    /// Drop the right tied to a rook home corner, if `sq` is one.
    fn clear_castling_right_at(&mut self, color: Color, sq: Square) -> u64 {
        let rank = color.back_rank();
        if sq == Square(rank, 7) {
            self.clear_castling_right(color, true)
        } else if sq == Square(rank, 0) {
            self.clear_castling_right(color, false)
        } else {
            0
        }
    }
}
