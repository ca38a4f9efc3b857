//! Attack tables for move generation.
//!
//! Sliding pieces use magic bitboards; knights, kings and pawns use plain
//! per-square lookup tables. Every table is built lazily on first use.

mod magic;
mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use magic::{BISHOP_TABLE, ROOK_TABLE};

/// Get bishop attacks (diagonals only)
#[inline]
pub(crate) fn bishop_attacks(square: usize, occupancy: u64) -> u64 {
    BISHOP_TABLE.attacks(square, occupancy)
}

/// Get rook attacks (ranks and files only)
#[inline]
pub(crate) fn rook_attacks(square: usize, occupancy: u64) -> u64 {
    ROOK_TABLE.attacks(square, occupancy)
}

/// Get queen attacks (all 8 directions)
#[inline]
pub(crate) fn queen_attacks(square: usize, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::magic::{slow_bishop_attacks, slow_rook_attacks};
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FILE_A: u64 = 0x0101010101010101;

    #[test]
    fn test_rook_attacks_empty_board() {
        let attacks = rook_attacks(28, 0);
        let expected = ((0xFFu64 << 24) | (FILE_A << 4)) & !(1u64 << 28);
        assert_eq!(attacks, expected);
    }

    #[test]
    fn test_bishop_attacks_empty_board() {
        let attacks = bishop_attacks(28, 0);
        assert_ne!(attacks & (1u64 << 1), 0); // b1
        assert_ne!(attacks & (1u64 << 55), 0); // h7
        assert_ne!(attacks & (1u64 << 7), 0); // h1
        assert_ne!(attacks & (1u64 << 56), 0); // a8
        assert_eq!(attacks & (1u64 << 28), 0);
        assert_eq!(attacks.count_ones(), 13);
    }

    #[test]
    fn test_rook_attacks_with_blockers() {
        let blockers = (1u64 << 44) | (1u64 << 26); // e6 and c4
        let attacks = rook_attacks(28, blockers);
        assert_ne!(attacks & (1u64 << 44), 0);
        assert_eq!(attacks & (1u64 << 52), 0);
        assert_ne!(attacks & (1u64 << 26), 0);
        assert_eq!(attacks & (1u64 << 25), 0);
    }

    #[test]
    fn test_edge_rook_sees_blocker_on_edge_file() {
        // h1 rook, blocker on h4: h2..h4 only along the file
        let attacks = rook_attacks(7, 1u64 << 31);
        assert_ne!(attacks & (1u64 << 31), 0);
        assert_eq!(attacks & (1u64 << 39), 0);
    }

    #[test]
    fn test_magic_matches_ray_walk() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let occ: u64 = rng.gen::<u64>() & rng.gen::<u64>();
            let sq = rng.gen_range(0..64);
            assert_eq!(rook_attacks(sq, occ), slow_rook_attacks(sq, occ));
            assert_eq!(bishop_attacks(sq, occ), slow_bishop_attacks(sq, occ));
            assert_eq!(
                queen_attacks(sq, occ),
                slow_rook_attacks(sq, occ) | slow_bishop_attacks(sq, occ)
            );
        }
    }
}
