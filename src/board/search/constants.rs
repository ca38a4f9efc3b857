//! Search constants.
//!
//! Score bands, depth limits and move ordering priorities used by the
//! alpha-beta search.

use crate::board::MAX_PLY;

// ============================================================================
// SCORES
// ============================================================================

/// Score of being checkmated at the root; a mate found `n` plies deep
/// scores `MATE_SCORE - n`.
pub const MATE_SCORE: i32 = 30000;

/// Bound of the full search window, strictly outside every reachable score
pub const INFINITY: i32 = 31000;

/// Scores with absolute value >= this are mate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

// ============================================================================
// SEARCH LIMITS
// ============================================================================

/// Deepest iteration the driver will start
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Shortest budget handed out by clock-based time allocation
pub const MIN_TIME_BUDGET_MS: u64 = 5;

/// Moves left in the game assumed by clock-based time allocation
pub const MOVES_TO_GO: u32 = 40;

/// Safety margin subtracted from a clock-based budget
pub const TIME_OVERHEAD_MS: u64 = 5;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: PV/hash > captures > killers > quiet

/// PV move or hash move
pub const PV_MOVE_SCORE: i32 = 2_000_000;

/// Offset placing every capture (and queen promotion) above every quiet move
pub const CAPTURE_SCORE: i32 = 1_000_000;

/// First killer move (quiet that caused a beta cutoff at the same ply)
pub const KILLER1_SCORE: i32 = 500_000;

/// Second killer move (the displaced first killer)
pub const KILLER2_SCORE: i32 = 400_000;

/// MVV-LVA piece values: P, N, B, R, Q, K
pub const MVV_LVA: [i32; 6] = [10, 30, 32, 50, 90, 95];
