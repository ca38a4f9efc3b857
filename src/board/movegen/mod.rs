//! Legal move generation.
//!
//! Pseudo moves are produced per piece kind from the attack tables and pass
//! through a legality filter before they reach the output list. The filter
//! has two paths: while the mover is not in check and the moving piece is not
//! the king, only a slider ray from the king can be uncovered, so a single
//! occupancy recheck suffices. King moves, evasions and en-passant captures
//! are made on a scratch copy and tested in full.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::{
    bishop_attacks, queen_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::{Bitboard, Color, Move, MoveList, Piece, Position, Square};

/// Shift a bitboard by a signed amount (positive is towards rank 8).
#[inline]
fn shift(bb: u64, by: i32) -> u64 {
    if by >= 0 {
        bb << by
    } else {
        bb >> -by
    }
}

/// Square `delta` indices away from `sq`.
#[inline]
fn offset(sq: Square, delta: i32) -> Square {
    Square::from_index((sq.index() as i32 + delta) as usize)
}

/// Squares attacked by the pawns in `pawns` moving as `color`.
#[inline]
fn pawn_attack_span(pawns: u64, color: Color) -> u64 {
    let west = pawns & !Bitboard::FILE_A.0;
    let east = pawns & !Bitboard::FILE_H.0;
    match color {
        Color::White => (west << 7) | (east << 9),
        Color::Black => (west >> 9) | (east >> 7),
    }
}

/// Per-call generation state: the legality inputs computed once, the
/// destination mask and the output list.
struct Generator<'a> {
    position: &'a Position,
    us: Color,
    them: Color,
    occupied: u64,
    /// Destinations allowed for non-pawn pieces
    targets: u64,
    captures_only: bool,
    king: Option<Square>,
    in_check: bool,
    enemy_rook_like: u64,
    enemy_bishop_like: u64,
    moves: MoveList,
}

impl<'a> Generator<'a> {
    fn new(position: &'a Position, captures_only: bool) -> Self {
        let us = position.side_to_move();
        let them = us.opponent();
        let enemy = position.occupancy(them).0;
        let targets = if captures_only {
            enemy
        } else {
            !position.occupancy(us).0
        };
        let queens = position.pieces(them, Piece::Queen).0;
        Generator {
            position,
            us,
            them,
            occupied: position.all_occupied(),
            targets,
            captures_only,
            king: position.king_square(us),
            in_check: position.is_in_check(),
            enemy_rook_like: position.pieces(them, Piece::Rook).0 | queens,
            enemy_bishop_like: position.pieces(them, Piece::Bishop).0 | queens,
            moves: MoveList::new(),
        }
    }

    fn run(mut self) -> MoveList {
        self.pawn_moves();
        self.knight_moves();
        self.slider_moves();
        self.king_moves();
        self.moves
    }

    #[inline]
    fn push(&mut self, mv: Move, piece: Piece) {
        if self.is_legal(mv, piece, false) {
            self.moves.push(mv);
        }
    }

    /// Would `mv` leave our own king attacked?
    fn is_legal(&self, mv: Move, piece: Piece, en_passant: bool) -> bool {
        let Some(king) = self.king else {
            return true;
        };

        if self.in_check || piece == Piece::King || en_passant {
            let next = self.position.apply_move(mv);
            return match next.king_square(self.us) {
                Some(sq) => !next.is_square_attacked(sq, self.them),
                None => true,
            };
        }

        let to_bit = mv.to().bit();
        let occupied = (self.occupied & !mv.from().bit()) | to_bit;
        let rooks = self.enemy_rook_like & !to_bit;
        let bishops = self.enemy_bishop_like & !to_bit;
        rook_attacks(king.index(), occupied) & rooks == 0
            && bishop_attacks(king.index(), occupied) & bishops == 0
    }
}

impl Position {
    /// All legal moves for the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        Generator::new(self, false).run()
    }

    /// Legal moves whose destination holds an enemy piece.
    #[must_use]
    pub fn capture_moves(&self) -> MoveList {
        Generator::new(self, true).run()
    }

    /// Whether the side to move is in check.
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move();
        self.attacked_squares(us.opponent()).0 & self.pieces(us, Piece::King).0 != 0
    }

    /// True when the side to move has no legal move: checkmate if in check,
    /// stalemate otherwise.
    #[must_use]
    pub fn has_no_legal_moves(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Every square attacked by `by` with the current occupancy.
    #[must_use]
    pub fn attacked_squares(&self, by: Color) -> Bitboard {
        let occupied = self.all_occupied();
        let mut attacks = pawn_attack_span(self.pieces(by, Piece::Pawn).0, by);

        for sq in self.pieces(by, Piece::Knight).iter() {
            attacks |= KNIGHT_ATTACKS[sq.index()];
        }
        for sq in self.pieces(by, Piece::Bishop).iter() {
            attacks |= bishop_attacks(sq.index(), occupied);
        }
        for sq in self.pieces(by, Piece::Rook).iter() {
            attacks |= rook_attacks(sq.index(), occupied);
        }
        for sq in self.pieces(by, Piece::Queen).iter() {
            attacks |= queen_attacks(sq.index(), occupied);
        }
        for sq in self.pieces(by, Piece::King).iter() {
            attacks |= KING_ATTACKS[sq.index()];
        }

        Bitboard(attacks)
    }

    pub(crate) fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let idx = sq.index();
        let occupied = self.all_occupied();
        let queens = self.pieces(by, Piece::Queen).0;

        PAWN_ATTACKS[by.opponent().index()][idx] & self.pieces(by, Piece::Pawn).0 != 0
            || KNIGHT_ATTACKS[idx] & self.pieces(by, Piece::Knight).0 != 0
            || KING_ATTACKS[idx] & self.pieces(by, Piece::King).0 != 0
            || rook_attacks(idx, occupied) & (self.pieces(by, Piece::Rook).0 | queens) != 0
            || bishop_attacks(idx, occupied) & (self.pieces(by, Piece::Bishop).0 | queens) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_start_position_move_count() {
        let moves = Position::new().legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(Position::new().capture_moves().is_empty());
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        // the e2 knight is pinned by the e8 rook
        let pos = position("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = pos.legal_moves();
        assert!(moves.iter().all(|mv| mv.from() != Square(1, 4)));
    }

    #[test]
    fn test_check_evasions_only() {
        // white king on e1 checked by the rook on e8
        let pos = position("4r1k1/8/8/8/8/8/3P1P2/R3K3 w Q - 0 1");
        assert!(pos.is_in_check());
        for mv in pos.legal_moves().iter() {
            let next = pos.apply_move(*mv);
            assert!(!next.is_square_attacked(next.king_square(Color::White).unwrap(), Color::Black));
        }
        // castling out of check is not allowed
        assert!(!pos.legal_moves().contains(Move::new(Square(0, 4), Square(0, 2))));
    }

    #[test]
    fn test_castling_through_attack_is_illegal() {
        // f1 is attacked by the bishop on c4
        let pos = position("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1");
        assert!(!pos.legal_moves().contains(Move::new(Square(0, 4), Square(0, 6))));
        let clear = position("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(clear.legal_moves().contains(Move::new(Square(0, 4), Square(0, 6))));
    }

    #[test]
    fn test_en_passant_exposing_king_is_illegal() {
        // capturing e5xd6 would open the fifth rank to the rook on a5
        let pos = position("8/8/8/r2pP2K/8/8/8/4k3 w - d6 0 2");
        let ep = Move::new(Square(4, 4), Square(5, 3));
        assert!(!pos.legal_moves().contains(ep));
        let free = position("8/8/8/3pP3/8/8/8/K3k3 w - d6 0 2");
        assert!(free.legal_moves().contains(ep));
    }

    #[test]
    fn test_promotion_fan_out_order() {
        let pos = position("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let promos: Vec<Option<Piece>> = pos
            .legal_moves()
            .iter()
            .filter(|mv| mv.from() == Square(6, 0))
            .map(|mv| mv.promotion())
            .collect();
        assert_eq!(
            promos,
            vec![
                Some(Piece::Queen),
                Some(Piece::Knight),
                Some(Piece::Bishop),
                Some(Piece::Rook)
            ]
        );
    }

    #[test]
    fn test_capture_moves_hit_enemy_pieces_only() {
        let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let captures = pos.capture_moves();
        assert_eq!(captures.len(), 8);
        let enemy = pos.occupancy(Color::Black);
        assert!(captures.iter().all(|mv| enemy.contains(mv.to())));
        let legal = pos.legal_moves();
        assert!(captures.iter().all(|mv| legal.contains(*mv)));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let mate = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(mate.is_in_check());
        assert!(mate.has_no_legal_moves());

        let stalemate = position("7k/5Q2/8/8/8/8/8/6K1 b - - 0 1");
        assert!(!stalemate.is_in_check());
        assert!(stalemate.has_no_legal_moves());
    }

    #[test]
    fn test_attacked_squares_pawns_do_not_wrap() {
        let pos = position("4k3/8/8/8/8/8/P6P/4K3 w - - 0 1");
        let attacks = pos.attacked_squares(Color::White);
        assert!(attacks.contains(Square(2, 1)));
        assert!(attacks.contains(Square(2, 6)));
        assert!(!attacks.contains(Square(3, 0)));
        assert!(!attacks.contains(Square(2, 0)));
        assert!(!attacks.contains(Square(2, 7)));
    }
}
