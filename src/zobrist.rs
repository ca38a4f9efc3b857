//! Zobrist hashing for chess positions.
//!
//! Every hashed feature of a position (piece on square, side to move, each
//! castling flag, en-passant file per colour) owns one random 64-bit key. A
//! position's hash is the XOR of the keys of its features, so applying a move
//! only XORs out what changed and XORs in what appeared.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece][color][square]
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move_key: u64,
    // castling_keys[color][side]: 0 = kingside, 1 = queenside
    castling_keys: [[u64; 2]; 2],
    // en_passant_keys[color that double-pushed][file]
    en_passant_keys: [[u64; 8]; 2],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [[0; 2]; 2];
        let mut en_passant_keys = [[0; 8]; 2];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for color in &mut en_passant_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.index()][color.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move_key
    }

    #[inline]
    pub(crate) fn castling(&self, color: Color, kingside: bool) -> u64 {
        self.castling_keys[color.index()][usize::from(!kingside)]
    }

    #[inline]
    pub(crate) fn en_passant(&self, color: Color, file: usize) -> u64 {
        self.en_passant_keys[color.index()][file]
    }
}

/// Process-wide key set, generated once from a fixed seed.
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for idx in 0..64 {
                    assert!(seen.insert(ZOBRIST.piece(color, piece, Square::from_index(idx))));
                }
            }
            for kingside in [true, false] {
                assert!(seen.insert(ZOBRIST.castling(color, kingside)));
            }
            for file in 0..8 {
                assert!(seen.insert(ZOBRIST.en_passant(color, file)));
            }
        }
        assert!(seen.insert(ZOBRIST.side()));
    }
}
