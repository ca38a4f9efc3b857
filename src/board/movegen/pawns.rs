use super::super::attack_tables::PAWN_ATTACKS;
use super::super::{squares_of, Bitboard, Color, Move, Piece, Square, PROMOTION_PIECES};
use super::{offset, shift, Generator};

impl Generator<'_> {
    /// Pushes, double pushes, captures, promotions and en passant, all by
    /// whole-set shifts. Edge files are masked off before diagonal shifts so
    /// captures never wrap around the board.
    pub(super) fn pawn_moves(&mut self) {
        let pawns = self.position.pieces(self.us, Piece::Pawn).0;
        let empty = !self.occupied;
        let enemy = self.position.occupancy(self.them).0;

        let (push, double_rank, west, east) = match self.us {
            Color::White => (8, Bitboard::RANK_3.0, 7, 9),
            Color::Black => (-8, Bitboard::RANK_6.0, -9, -7),
        };

        if !self.captures_only {
            let single = shift(pawns, push) & empty;
            let double = shift(single & double_rank, push) & empty;

            for to in squares_of(single) {
                self.push_pawn(offset(to, -push), to);
            }
            for to in squares_of(double) {
                self.push(Move::new(offset(to, -2 * push), to), Piece::Pawn);
            }
        }

        let west_captures = shift(pawns & !Bitboard::FILE_A.0, west) & enemy;
        let east_captures = shift(pawns & !Bitboard::FILE_H.0, east) & enemy;
        for to in squares_of(west_captures) {
            self.push_pawn(offset(to, -west), to);
        }
        for to in squares_of(east_captures) {
            self.push_pawn(offset(to, -east), to);
        }

        if !self.captures_only {
            self.en_passant_moves(pawns);
        }
    }

    fn en_passant_moves(&mut self, pawns: u64) {
        let Some(file) = self.position.en_passant_file(self.them) else {
            return;
        };
        let rank = match self.us {
            Color::White => 5,
            Color::Black => 2,
        };
        let target = Square(rank, file);
        if self.occupied & target.bit() != 0 {
            return;
        }
        // our pawns that attack the target are those a `them` pawn there would attack
        let attackers = PAWN_ATTACKS[self.them.index()][target.index()] & pawns;
        for from in squares_of(attackers) {
            let mv = Move::new(from, target);
            if self.is_legal(mv, Piece::Pawn, true) {
                self.moves.push(mv);
            }
        }
    }

    fn push_pawn(&mut self, from: Square, to: Square) {
        if to.rank() == self.them.back_rank() {
            for piece in PROMOTION_PIECES {
                self.push(Move::with_promotion(from, to, piece), Piece::Pawn);
            }
        } else {
            self.push(Move::new(from, to), Piece::Pawn);
        }
    }
}
