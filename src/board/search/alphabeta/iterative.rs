use std::time::{Duration, Instant};

use super::super::constants::{MATE_SCORE, MATE_THRESHOLD};
use super::super::{SearchInfo, SearchLogger, SearchResult};
use super::AlphaBetaContext;
use crate::board::Move;

impl AlphaBetaContext<'_> {
    /// Iterative deepening from depth 1 to `max_depth`.
    ///
    /// Stops early on a mate score or once `budget` has elapsed since
    /// `start`. The answer is the best move of the last completed iteration;
    /// the partial result of an interrupted iteration is only used when no
    /// iteration completed.
    pub fn iterative_deepening(
        &mut self,
        max_depth: u32,
        budget: Option<Duration>,
        start: Instant,
        logger: Option<&dyn SearchLogger>,
    ) -> SearchResult {
        let mut result = SearchResult::default();

        let root = *self.history.current();
        let root_moves = root.legal_moves();
        if root_moves.is_empty() {
            result.score = if root.is_in_check() { -MATE_SCORE } else { 0 };
            result.nodes = self.nodes();
            result.elapsed = start.elapsed();
            return result;
        }

        let mut pv_move = Move::EMPTY;
        let mut partial = Move::EMPTY;

        for depth in 1..=max_depth {
            self.killers.reset();
            let outcome = self.search_root(depth, pv_move);

            if !outcome.completed {
                log::debug!(
                    "depth {depth} interrupted after {} nodes, keeping depth {}",
                    self.nodes(),
                    result.depth
                );
                partial = outcome.best_move;
                break;
            }

            if !outcome.best_move.is_empty() {
                result.best_move = outcome.best_move;
                pv_move = outcome.best_move;
            }
            result.score = outcome.score;
            result.depth = depth;

            let elapsed = start.elapsed();
            let info = SearchInfo {
                depth,
                score: outcome.score,
                best_move: outcome.best_move,
                nodes: self.nodes(),
                elapsed,
                nps: nodes_per_second(self.nodes(), elapsed),
                hashfull: self.params.use_tt.then(|| self.tt.hashfull_per_mille()),
            };
            log::info!("{info}");
            if let Some(logger) = logger {
                logger.info(&info);
            }
            result.iterations.push(info);

            if outcome.score.abs() >= MATE_THRESHOLD {
                break;
            }
            if budget.is_some_and(|budget| elapsed >= budget) {
                break;
            }
        }

        if result.best_move.is_empty() {
            if partial.is_empty() {
                if let Some(mv) = root_moves.first() {
                    log::warn!("no search result in time, playing unsearched move {mv}");
                    result.best_move = mv;
                }
            } else {
                result.best_move = partial;
            }
        }

        result.nodes = self.nodes();
        result.elapsed = start.elapsed();
        result
    }
}

fn nodes_per_second(nodes: u64, elapsed: Duration) -> u64 {
    let micros = elapsed.as_micros().max(1);
    (u128::from(nodes) * 1_000_000 / micros) as u64
}
