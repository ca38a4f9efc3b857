use super::super::constants::MATE_THRESHOLD;
use super::super::move_order::{captured_piece, order_moves};
use super::{AlphaBetaContext, Interrupted};
use crate::board::Move;

impl AlphaBetaContext<'_> {
    /// Static evaluation from the side to move's point of view, kept clear of
    /// the mate band.
    fn stand_pat(&self) -> i32 {
        let sign = self.history.current().side_to_move().sign();
        let score = self.evaluator.evaluate(&self.history).saturating_mul(sign);
        score.clamp(-MATE_THRESHOLD + 1, MATE_THRESHOLD - 1)
    }

    /// Quiescence search over captures with stand-pat and delta pruning
    pub(super) fn quiescence(&mut self, mut alpha: i32, beta: i32) -> Result<i32, Interrupted> {
        self.visit()?;

        let stand_pat = self.stand_pat();
        if stand_pat >= beta {
            return Ok(stand_pat);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let position = *self.history.current();
        let us = position.side_to_move();
        if position.attacked_squares(us).0 & position.occupancy(us.opponent()).0 == 0 {
            return Ok(stand_pat);
        }

        let captures = position.capture_moves();
        let mut ordered = order_moves(&position, &captures, Move::EMPTY, [Move::EMPTY; 2]);
        let mut best_score = stand_pat;
        let mut i = 0;

        while let Some(scored) = ordered.pick_best(i) {
            i += 1;
            let mv = scored.mv;

            // Delta pruning: even winning the victim outright cannot reach alpha
            let gain = captured_piece(&position, mv).map_or(0, |piece| piece.value());
            if stand_pat + gain + self.params.delta_margin < alpha {
                continue;
            }

            self.history.push_move(mv);
            let result = self.quiescence(-beta, -alpha);
            self.history.pop();
            let score = -result?;

            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::constants::INFINITY;
    use super::super::super::SearchParams;
    use super::*;
    use crate::board::{Position, PositionHistory};
    use crate::eval::{Evaluator, MaterialEvaluator};
    use crate::tt::TranspositionTable;

    fn quiesce(fen: &str, params: &SearchParams) -> (i32, u64) {
        let tt = TranspositionTable::new(1);
        let evaluator = MaterialEvaluator;
        let history = PositionHistory::new(Position::from_fen(fen).unwrap());
        let mut ctx = AlphaBetaContext::new(history, &tt, &evaluator, params, None);
        let score = ctx.quiescence(-INFINITY, INFINITY).unwrap();
        (score, ctx.nodes())
    }

    #[test]
    fn test_quiet_position_returns_stand_pat() {
        let params = SearchParams::default();
        let fen = "4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1";
        let tt = TranspositionTable::new(1);
        let history = PositionHistory::new(Position::from_fen(fen).unwrap());
        let expected = MaterialEvaluator.evaluate(&history);
        let mut ctx = AlphaBetaContext::new(history, &tt, &MaterialEvaluator, &params, None);

        // no captures to try: the static score comes straight back, every time
        let first = ctx.quiescence(-INFINITY, INFINITY).unwrap();
        let second = ctx.quiescence(-INFINITY, INFINITY).unwrap();
        assert_eq!(first, expected);
        assert_eq!(second, first);
        assert_eq!(ctx.nodes(), 2);
    }

    #[test]
    fn test_hanging_queen_is_taken() {
        let params = SearchParams::default();
        // the black queen on d5 hangs to the e4 pawn
        let (score, _) = quiesce("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", &params);
        assert!(score > 0, "score {score}");
    }

    #[test]
    fn test_score_from_black_point_of_view() {
        let params = SearchParams::default();
        // a queen down with black to move and nothing to capture
        let (score, _) = quiesce("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1", &params);
        assert!(score < -800, "score {score}");
    }

    #[test]
    fn test_defended_pawn_not_worth_a_queen() {
        let params = SearchParams::default();
        // Qxd5 loses the queen to exd5, so white stands pat
        let fen = "4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1";
        let (score, nodes) = quiesce(fen, &params);
        let history = PositionHistory::new(Position::from_fen(fen).unwrap());
        assert_eq!(score, MaterialEvaluator.evaluate(&history));
        assert!(score > 0);
        assert!(nodes > 1);
    }
}
