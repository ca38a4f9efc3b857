//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with the previous best move searched first
//! - Negamax alpha-beta with check extensions
//! - Quiescence search with stand-pat and delta pruning
//! - Move ordering (PV/hash move, MVV-LVA, killers)
//! - Transposition table for cutoffs and move ordering
//!
//! The search is single-threaded. Time is checked cooperatively against a
//! deadline; an interrupted iteration is discarded in favour of the last
//! completed one.

mod alphabeta;
mod constants;
mod move_order;
mod params;
mod report;

use std::fmt;
use std::time::{Duration, Instant};

use crate::eval::Evaluator;
use crate::tt::{TableError, TranspositionTable};

use super::{Move, PositionHistory};
use alphabeta::AlphaBetaContext;

pub use constants::{INFINITY, MATE_SCORE};
pub use params::{SearchLimits, SearchParams};
pub use report::{SearchInfo, SearchLogger};

/// Result of a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// `Move::EMPTY` only when the root has no legal move
    pub best_move: Move,
    /// Score of the last completed iteration, from the mover's point of view
    pub score: i32,
    /// Last completed depth, 0 if none completed
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// One report per completed iteration, shallowest first
    pub iterations: Vec<SearchInfo>,
}

/// Search state persisted across searches: the transposition table, the
/// search parameters and an optional per-iteration observer.
pub struct SearchState {
    tt: TranspositionTable,
    params: SearchParams,
    logger: Option<Box<dyn SearchLogger + Send>>,
}

impl SearchState {
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        SearchState {
            tt: TranspositionTable::new(params.tt_entries),
            params,
            logger: None,
        }
    }

    /// Like [`SearchState::new`], but reports a failed table allocation.
    pub fn try_new(params: SearchParams) -> Result<Self, TableError> {
        Ok(SearchState {
            tt: TranspositionTable::try_new(params.tt_entries)?,
            params,
            logger: None,
        })
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Replace the parameters, rebuilding the table if its size changed.
    pub fn set_params(&mut self, params: SearchParams) -> Result<(), TableError> {
        if params.tt_entries != self.params.tt_entries {
            self.tt = TranspositionTable::try_new(params.tt_entries)?;
        }
        self.params = params;
        Ok(())
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Forget everything learned so far, e.g. before a new game.
    pub fn clear(&mut self) {
        self.tt.clear();
    }

    pub fn set_logger(&mut self, logger: Box<dyn SearchLogger + Send>) {
        self.logger = Some(logger);
    }

    pub fn clear_logger(&mut self) {
        self.logger = None;
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(SearchParams::default())
    }
}

impl fmt::Debug for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchState")
            .field("tt_entries", &self.tt.len())
            .field("params", &self.params)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Find the best move for the newest position of `history`.
///
/// Runs iterative deepening within `limits`, reusing and refilling the
/// transposition table held by `state`. The caller's history is not
/// modified.
///
/// # Example
/// ```
/// use chess_search::board::{find_best_move, PositionHistory, SearchLimits, SearchParams, SearchState};
/// use chess_search::eval::MaterialEvaluator;
///
/// let history = PositionHistory::default();
/// let mut state = SearchState::new(SearchParams { tt_entries: 1 << 12, ..SearchParams::default() });
/// let result = find_best_move(&history, &mut state, &MaterialEvaluator, &SearchLimits::depth(2));
/// assert!(history.current().legal_moves().contains(result.best_move));
/// ```
pub fn find_best_move(
    history: &PositionHistory,
    state: &mut SearchState,
    evaluator: &dyn Evaluator,
    limits: &SearchLimits,
) -> SearchResult {
    let start = Instant::now();
    let deadline = limits.time_budget.map(|budget| start + budget);
    let logger = state.logger.as_deref().map(|logger| logger as &dyn SearchLogger);

    let mut context =
        AlphaBetaContext::new(history.clone(), &state.tt, evaluator, &state.params, deadline);
    context.iterative_deepening(limits.max_depth, limits.time_budget, start, logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::eval::MaterialEvaluator;
    use std::sync::{Arc, Mutex};

    fn small_state() -> SearchState {
        SearchState::new(SearchParams {
            tt_entries: 1 << 14,
            ..SearchParams::default()
        })
    }

    struct Recorder(Arc<Mutex<Vec<u32>>>);

    impl SearchLogger for Recorder {
        fn info(&self, info: &SearchInfo) {
            if let Ok(mut depths) = self.0.lock() {
                depths.push(info.depth);
            }
        }
    }

    #[test]
    fn test_state_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SearchState>();
    }

    #[test]
    fn test_iterations_reported_in_order() {
        let depths = Arc::new(Mutex::new(Vec::new()));
        let mut state = small_state();
        state.set_logger(Box::new(Recorder(Arc::clone(&depths))));

        let history = PositionHistory::default();
        let result = find_best_move(&history, &mut state, &MaterialEvaluator, &SearchLimits::depth(3));

        assert_eq!(result.depth, 3);
        assert_eq!(*depths.lock().unwrap(), vec![1, 2, 3]);
        let reported: Vec<u32> = result.iterations.iter().map(|info| info.depth).collect();
        assert_eq!(reported, vec![1, 2, 3]);
        assert_eq!(result.iterations[2].best_move, result.best_move);
        assert!(result.nodes >= result.iterations[2].nodes);
        assert!(result.iterations.iter().all(|info| info.hashfull.is_some()));
    }

    #[test]
    fn test_no_legal_moves() {
        let mut state = small_state();
        let mated = PositionHistory::new(Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap());
        let result = find_best_move(&mated, &mut state, &MaterialEvaluator, &SearchLimits::depth(4));
        assert!(result.best_move.is_empty());
        assert_eq!(result.score, -MATE_SCORE);
        assert!(result.iterations.is_empty());

        let stalemate = PositionHistory::new(Position::from_fen("7k/5Q2/8/8/8/8/8/6K1 b - - 0 1").unwrap());
        let result = find_best_move(&stalemate, &mut state, &MaterialEvaluator, &SearchLimits::depth(4));
        assert!(result.best_move.is_empty());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_mate_stops_deepening() {
        let mut state = small_state();
        let history = PositionHistory::new(Position::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap());
        let result = find_best_move(&history, &mut state, &MaterialEvaluator, &SearchLimits::depth(10));
        assert_eq!(result.best_move.to_string(), "e1e8");
        assert_eq!(result.score, MATE_SCORE - 1);
        assert_eq!(result.depth, 1);
        assert_eq!(result.iterations[0].mate_in(), Some(1));
    }

    #[test]
    fn test_zero_budget_still_returns_a_legal_move() {
        let mut state = SearchState::new(SearchParams {
            tt_entries: 1 << 10,
            time_check_interval: 1,
            ..SearchParams::default()
        });
        let history = PositionHistory::default();
        let limits = SearchLimits::time(Duration::ZERO);
        let result = find_best_move(&history, &mut state, &MaterialEvaluator, &limits);
        assert!(history.current().legal_moves().contains(result.best_move));
        assert_eq!(result.depth, 0);
        assert!(result.iterations.is_empty());
    }

    #[test]
    fn test_set_params_resizes_table() {
        let mut state = small_state();
        assert_eq!(state.tt().len(), 1 << 14);
        state
            .set_params(SearchParams {
                tt_entries: 1 << 8,
                ..SearchParams::default()
            })
            .unwrap();
        assert_eq!(state.tt().len(), 1 << 8);
        assert_eq!(state.params().tt_entries, 1 << 8);
    }

    #[test]
    fn test_history_left_untouched() {
        let mut state = small_state();
        let history = PositionHistory::from_moves(Position::new(), ["e2e4", "e7e5"]).unwrap();
        let before = history.current().hash();
        find_best_move(&history, &mut state, &MaterialEvaluator, &SearchLimits::depth(3));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().hash(), before);
        assert!(state.hashfull_per_mille() > 0);
        state.clear();
        assert!(state.tt().is_empty());
    }
}
