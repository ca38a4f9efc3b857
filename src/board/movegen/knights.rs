use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{squares_of, Move, Piece};
use super::Generator;

impl Generator<'_> {
    pub(super) fn knight_moves(&mut self) {
        for from in self.position.pieces(self.us, Piece::Knight).iter() {
            for to in squares_of(KNIGHT_ATTACKS[from.index()] & self.targets) {
                self.push(Move::new(from, to), Piece::Knight);
            }
        }
    }
}
