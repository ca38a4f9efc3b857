//! A single-threaded alpha-beta chess search.
//!
//! [`board`] holds the position model, legal move generation and the
//! search itself; [`tt`] the transposition table; [`eval`] the pluggable
//! evaluation collaborator.

pub mod board;
pub mod eval;
pub mod tt;
pub(crate) mod zobrist;

pub use board::{
    find_best_move, Color, Move, Piece, Position, PositionHistory, SearchLimits, SearchParams,
    SearchResult, SearchState, Square,
};
pub use eval::{Evaluator, MaterialEvaluator};
pub use tt::TranspositionTable;
