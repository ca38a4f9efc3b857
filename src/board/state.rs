use super::{Bitboard, CastlingRights, Color, Piece, Square};

/// Contents of one grid cell
pub type Cell = Option<(Color, Piece)>;

/// Phase counter of the full starting material
pub const MAX_PHASE: i32 = 24;

/// A chess position.
///
/// The 8x8 grid and the bitboards are two views of the same placement and are
/// always kept in agreement. `hash` always equals [`Position::compute_hash`].
/// Positions are small `Copy` values: applying a move produces a new position
/// and leaves the original untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) grid: [[Cell; 8]; 8], // [rank][file]
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    /// File of the pawn that just double-pushed, indexed by that pawn's colour
    pub(crate) en_passant: [Option<u8>; 2],
    pub(crate) halfmove_clock: u32,
    pub(crate) phase: i32,
    pub(crate) hash: u64,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        for (file, piece) in BACK_RANK.iter().enumerate() {
            position.set_piece(Square(0, file), Color::White, *piece);
            position.set_piece(Square(1, file), Color::White, Piece::Pawn);
            position.set_piece(Square(6, file), Color::Black, Piece::Pawn);
            position.set_piece(Square(7, file), Color::Black, *piece);
        }
        position.castling_rights = CastlingRights::all();
        position.rebuild_derived();
        position
    }

    pub(crate) fn empty() -> Self {
        Position {
            grid: [[None; 8]; 8],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: [None; 2],
            halfmove_clock: 0,
            phase: 0,
            hash: 0,
        }
    }

    /// Recompute bitboards, phase and hash from the grid.
    pub(crate) fn rebuild_derived(&mut self) {
        self.pieces = [[Bitboard::EMPTY; 6]; 2];
        self.occupied = [Bitboard::EMPTY; 2];
        self.phase = 0;
        for rank in 0..8 {
            for file in 0..8 {
                if let Some((color, piece)) = self.grid[rank][file] {
                    let bit = Square(rank, file).bit();
                    self.pieces[color.index()][piece.index()].0 |= bit;
                    self.occupied[color.index()].0 |= bit;
                    self.phase += piece.phase_weight();
                }
            }
        }
        self.hash = self.compute_hash();
    }

    /// Place a piece in both views. Does not touch the hash.
    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = sq.bit();
        self.grid[sq.rank()][sq.file()] = Some((color, piece));
        self.pieces[color.index()][piece.index()].0 |= bit;
        self.occupied[color.index()].0 |= bit;
    }

    /// Clear a square in both views. Does not touch the hash.
    #[inline]
    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = !sq.bit();
        self.grid[sq.rank()][sq.file()] = None;
        self.pieces[color.index()][piece.index()].0 &= bit;
        self.occupied[color.index()].0 &= bit;
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Cell {
        self.grid[sq.rank()][sq.file()]
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    pub(crate) fn all_occupied(&self) -> u64 {
        self.occupied[0].0 | self.occupied[1].0
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// En-passant file left by `color`'s last double push, if any
    #[inline]
    #[must_use]
    pub fn en_passant_file(&self, color: Color) -> Option<usize> {
        self.en_passant[color.index()].map(usize::from)
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Material phase: 24 at the start, 0 with only kings and pawns.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> i32 {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or bishops that all stand on one square colour.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let both = |piece: Piece| {
            self.pieces(Color::White, piece).0 | self.pieces(Color::Black, piece).0
        };

        if both(Piece::Pawn) | both(Piece::Rook) | both(Piece::Queen) != 0 {
            return false;
        }

        let knights = both(Piece::Knight).count_ones();
        let bishops = both(Piece::Bishop);
        let minors = knights + bishops.count_ones();

        if minors <= 1 {
            return true;
        }

        knights == 0
            && (bishops & Bitboard::LIGHT_SQUARES.0 == 0 || bishops & Bitboard::DARK_SQUARES.0 == 0)
    }

    /// The same position seen from the other side: ranks flipped, colours
    /// swapped, side to move swapped.
    #[must_use]
    pub fn mirrored(&self) -> Position {
        let mut mirror = Position::empty();
        for rank in 0..8 {
            for file in 0..8 {
                if let Some((color, piece)) = self.grid[rank][file] {
                    mirror.grid[7 - rank][file] = Some((color.opponent(), piece));
                }
            }
        }
        mirror.side_to_move = self.side_to_move.opponent();
        mirror.castling_rights = self.castling_rights.swap_colors();
        mirror.en_passant = [self.en_passant[1], self.en_passant[0]];
        mirror.halfmove_clock = self.halfmove_clock;
        mirror.rebuild_derived();
        mirror
    }

    /// Grid and bitboard views describe the same placement.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        for rank in 0..8 {
            for file in 0..8 {
                if let Some((color, piece)) = self.grid[rank][file] {
                    pieces[color.index()][piece.index()].0 |= Square(rank, file).bit();
                }
            }
        }
        let occupied_ok = Color::BOTH.iter().all(|&color| {
            let union = pieces[color.index()].iter().fold(0, |acc, bb| acc | bb.0);
            union == self.occupied[color.index()].0
        });
        pieces == self.pieces && occupied_ok
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
