use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{squares_of, Move, Piece};
use super::Generator;

impl Generator<'_> {
    pub(super) fn slider_moves(&mut self) {
        let occupied = self.occupied;
        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            for from in self.position.pieces(self.us, piece).iter() {
                let attacks = match piece {
                    Piece::Bishop => bishop_attacks(from.index(), occupied),
                    Piece::Rook => rook_attacks(from.index(), occupied),
                    _ => queen_attacks(from.index(), occupied),
                };
                for to in squares_of(attacks & self.targets) {
                    self.push(Move::new(from, to), piece);
                }
            }
        }
    }
}
