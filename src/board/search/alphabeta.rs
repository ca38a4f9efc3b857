//! Core search implementation.
//!
//! This module implements:
//! - Negamax alpha-beta with fail-soft scores
//! - Check extensions at the horizon
//! - Repetition and fifty-move draw detection
//! - Transposition table cutoffs and hash move ordering
//! - Killer moves
//! - Quiescence search with delta pruning
//! - Iterative deepening with cooperative time checks

mod iterative;
mod quiescence;

use std::time::Instant;

use super::constants::{INFINITY, MATE_SCORE};
use super::move_order::{captured_piece, order_moves, KillerTable};
use super::SearchParams;
use crate::board::{Move, PositionHistory};
use crate::eval::Evaluator;
use crate::tt::{Bound, TranspositionTable};

/// The deadline passed mid-search. Scores computed under an interrupted node
/// are meaningless and are never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Interrupted;

/// Outcome of one root search.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RootOutcome {
    pub best_move: Move,
    pub score: i32,
    /// False if the deadline cut the iteration short; `best_move` then only
    /// covers the root moves searched before the interruption.
    pub completed: bool,
}

/// Search context for a single search
pub(crate) struct AlphaBetaContext<'a> {
    /// The caller's game history plus the line currently being searched
    history: PositionHistory,
    tt: &'a TranspositionTable,
    evaluator: &'a dyn Evaluator,
    params: &'a SearchParams,
    killers: KillerTable,
    nodes: u64,
    deadline: Option<Instant>,
}

impl<'a> AlphaBetaContext<'a> {
    pub fn new(
        history: PositionHistory,
        tt: &'a TranspositionTable,
        evaluator: &'a dyn Evaluator,
        params: &'a SearchParams,
        deadline: Option<Instant>,
    ) -> Self {
        AlphaBetaContext {
            history,
            tt,
            evaluator,
            params,
            killers: KillerTable::new(),
            nodes: 0,
            deadline,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Count a node and, every `time_check_interval` nodes, test the deadline.
    fn visit(&mut self) -> Result<(), Interrupted> {
        self.nodes += 1;
        let Some(deadline) = self.deadline else {
            return Ok(());
        };
        let interval = self.params.time_check_interval.max(1);
        if self.nodes.is_multiple_of(interval) && Instant::now() >= deadline {
            return Err(Interrupted);
        }
        Ok(())
    }

    /// Search every root move to `depth` with a full window.
    ///
    /// `pv_move` is tried first. The root never takes a table cutoff, so the
    /// returned move always comes from a real search.
    pub fn search_root(&mut self, depth: u32, pv_move: Move) -> RootOutcome {
        self.nodes += 1;
        let position = *self.history.current();
        let moves = position.legal_moves();

        if moves.is_empty() {
            let score = if position.is_in_check() { -MATE_SCORE } else { 0 };
            return RootOutcome {
                best_move: Move::EMPTY,
                score,
                completed: true,
            };
        }

        let mut ordered = order_moves(&position, &moves, pv_move, self.killers.get(0));
        let mut alpha = -INFINITY;
        let mut best_score = -INFINITY;
        let mut best_move = Move::EMPTY;
        let mut i = 0;

        while let Some(scored) = ordered.pick_best(i) {
            i += 1;
            let mv = scored.mv;

            self.history.push_move(mv);
            let result = self.negamax(depth.saturating_sub(1), -INFINITY, -alpha, 1, 0);
            self.history.pop();

            let Ok(child) = result else {
                return RootOutcome {
                    best_move,
                    score: best_score,
                    completed: false,
                };
            };
            let score = -child;

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
        }

        if self.params.use_tt {
            self.tt
                .store(position.hash(), best_score, depth, best_move, Bound::Exact, 0);
        }

        RootOutcome {
            best_move,
            score: best_score,
            completed: true,
        }
    }

    /// Negamax alpha-beta. Scores are from the side to move's point of view;
    /// `extensions` counts the check extensions already spent on this line.
    fn negamax(
        &mut self,
        mut depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        mut extensions: u32,
    ) -> Result<i32, Interrupted> {
        self.visit()?;

        let position = *self.history.current();
        if ply > 0
            && (self.history.repetitions() >= 2
                || position.halfmove_clock() >= self.params.fifty_move_limit)
        {
            return Ok(0);
        }

        let in_check = position.is_in_check();
        let hash = position.hash();

        if depth == 0 {
            if in_check && extensions < self.params.max_check_extensions {
                depth = 1;
                extensions += 1;
            } else {
                let score = self.quiescence(alpha, beta)?;
                if self.params.use_tt {
                    let bound = if score <= alpha {
                        Bound::Upper
                    } else if score >= beta {
                        Bound::Lower
                    } else {
                        Bound::Exact
                    };
                    self.tt.store(hash, score, 0, Move::EMPTY, bound, ply);
                }
                return Ok(score);
            }
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            return Ok(if in_check { -(MATE_SCORE - ply as i32) } else { 0 });
        }

        let mut hint = Move::EMPTY;
        if self.params.use_tt {
            if let Some(entry) = self.tt.lookup(hash, depth, alpha, beta, ply) {
                if entry.best_move.is_empty() || moves.contains(entry.best_move) {
                    return Ok(entry.score);
                }
            } else if let Some(entry) = self.tt.probe(hash) {
                if moves.contains(entry.best_move) {
                    hint = entry.best_move;
                }
            }
        }

        let mut ordered = order_moves(&position, &moves, hint, self.killers.get(ply));
        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = Move::EMPTY;
        let mut cutoff = false;
        let mut i = 0;

        while let Some(scored) = ordered.pick_best(i) {
            i += 1;
            let mv = scored.mv;

            self.history.push_move(mv);
            let result = self.negamax(depth - 1, -beta, -alpha, ply + 1, extensions);
            self.history.pop();
            let score = -result?;

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if captured_piece(&position, mv).is_none() {
                    self.killers.update(ply, mv);
                }
                cutoff = true;
                break;
            }
        }

        if self.params.use_tt {
            let bound = if cutoff {
                Bound::Lower
            } else if best_score <= original_alpha {
                Bound::Upper
            } else {
                Bound::Exact
            };
            self.tt.store(hash, best_score, depth, best_move, bound, ply);
        }

        Ok(best_score)
    }
}
