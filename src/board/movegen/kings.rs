use super::super::attack_tables::KING_ATTACKS;
use super::super::{squares_of, Move, Piece, Square};
use super::Generator;

// Files that must be empty between king and rook
const KINGSIDE_BETWEEN: [usize; 2] = [5, 6];
const QUEENSIDE_BETWEEN: [usize; 3] = [1, 2, 3];

impl Generator<'_> {
    pub(super) fn king_moves(&mut self) {
        let Some(from) = self.king else {
            return;
        };

        for to in squares_of(KING_ATTACKS[from.index()] & self.targets) {
            self.push(Move::new(from, to), Piece::King);
        }

        if !self.captures_only && !self.in_check {
            self.castling_moves(from);
        }
    }

    /// Castling needs the right, the rook on its corner, empty squares
    /// between them, and no attack on the squares the king crosses. The start
    /// square is covered by the caller's check test.
    fn castling_moves(&mut self, from: Square) {
        let rank = self.us.back_rank();
        if from != Square(rank, 4) {
            return;
        }
        let rights = self.position.castling_rights();

        for (kingside, rook_file, between, crossed) in [
            (true, 7, &KINGSIDE_BETWEEN[..], [5, 6]),
            (false, 0, &QUEENSIDE_BETWEEN[..], [3, 2]),
        ] {
            if !rights.has(self.us, kingside)
                || self.position.piece_at(Square(rank, rook_file)) != Some((self.us, Piece::Rook))
            {
                continue;
            }
            if between
                .iter()
                .any(|&file| self.position.piece_at(Square(rank, file)).is_some())
            {
                continue;
            }
            if crossed
                .iter()
                .any(|&file| self.position.is_square_attacked(Square(rank, file), self.them))
            {
                continue;
            }
            self.moves.push(Move::new(from, Square(rank, crossed[1])));
        }
    }
}
