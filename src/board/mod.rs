//! Chess board representation, move generation and search.
//!
//! Positions keep an 8x8 grid and bitboards side by side with an incremental
//! Zobrist hash. Move generation is fully legal; the search walks copies of
//! positions rather than making and unmaking moves in place.
//!
//! # Example
//! ```
//! use chess_search::board::{Position, PositionHistory};
//!
//! let position = Position::new();
//! let moves = position.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//!
//! let history = PositionHistory::from_moves(position, ["e2e4", "e7e5"]).unwrap();
//! assert_eq!(history.len(), 3);
//! ```

mod attack_tables;
mod error;
mod fen;
mod history;
mod make_move;
mod movegen;
mod perft;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use history::PositionHistory;
pub use state::{Cell, Position, MAX_PHASE};
pub use types::{Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, Piece, Square};

pub use search::{
    find_best_move, SearchInfo, SearchLimits, SearchLogger, SearchParams, SearchResult,
    SearchState, INFINITY, MATE_SCORE,
};

pub(crate) use types::{squares_of, ScoredMoveList, MAX_PLY, PROMOTION_PIECES};
