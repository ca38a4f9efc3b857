//! Property-based tests using proptest.

use crate::board::{Color, Move, Position, PositionHistory};
use proptest::prelude::*;
use rand::prelude::*;

/// Strategy to generate a random playout length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves from the start position,
/// returning every position reached (start included) and the moves played.
fn random_playout(seed: u64, num_moves: usize) -> (Vec<Position>, Vec<Move>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = vec![Position::new()];
    let mut moves = Vec::new();

    for _ in 0..num_moves {
        let current = positions[positions.len() - 1];
        let legal = current.legal_moves();
        let Some(&mv) = legal.as_slice().choose(&mut rng) else {
            break;
        };
        moves.push(mv);
        positions.push(current.apply_move(mv));
    }

    (positions, moves)
}

proptest! {
    /// Property: the incremental hash always matches a from-scratch recompute
    #[test]
    fn prop_incremental_hash_matches(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, _) = random_playout(seed, num_moves);
        for position in &positions {
            prop_assert_eq!(position.hash(), position.compute_hash());
        }
    }

    /// Property: the grid and the bitboards never disagree
    #[test]
    fn prop_views_stay_consistent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, _) = random_playout(seed, num_moves);
        for position in &positions {
            prop_assert!(position.is_consistent(), "{}", position.to_fen());
        }
    }

    /// Property: applying a move never changes the position it was applied to
    #[test]
    fn prop_apply_leaves_parent_untouched(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, moves) = random_playout(seed, num_moves);
        for (parent, mv) in positions.iter().zip(&moves) {
            let snapshot = *parent;
            let _child = parent.apply_move(*mv);
            prop_assert_eq!(*parent, snapshot);
        }
    }

    /// Property: legal moves never leave the mover's king attacked
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, _) = random_playout(seed, num_moves);
        let last = positions[positions.len() - 1];
        let us = last.side_to_move();
        for mv in last.legal_moves().iter() {
            let next = last.apply_move(*mv);
            let king = next.king_square(us).unwrap();
            prop_assert!(!next.is_square_attacked(king, us.opponent()), "{} in {}", mv, last.to_fen());
        }
    }

    /// Property: mirroring preserves the number of legal moves
    #[test]
    fn prop_mirror_preserves_move_count(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, _) = random_playout(seed, num_moves);
        let last = positions[positions.len() - 1];
        let mirror = last.mirrored();
        prop_assert_eq!(last.legal_moves().len(), mirror.legal_moves().len());
        prop_assert_eq!(last.is_in_check(), mirror.is_in_check());
        prop_assert_eq!(mirror.hash(), mirror.compute_hash());
    }

    /// Property: every generated capture is also a legal move
    #[test]
    fn prop_captures_are_legal_moves(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, _) = random_playout(seed, num_moves);
        let last = positions[positions.len() - 1];
        let legal = last.legal_moves();
        let them = last.occupancy(last.side_to_move().opponent());
        for mv in last.capture_moves().iter() {
            prop_assert!(legal.contains(*mv));
            prop_assert!(them.contains(mv.to()));
        }
    }

    /// Property: a position survives a FEN round trip
    #[test]
    fn prop_fen_round_trip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, _) = random_playout(seed, num_moves);
        let last = positions[positions.len() - 1];
        let parsed = Position::from_fen(&last.to_fen()).unwrap();
        prop_assert_eq!(parsed, last);
    }

    /// Property: pushing and popping a history restores its newest position
    #[test]
    fn prop_history_push_pop(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let (positions, moves) = random_playout(seed, num_moves);
        let mut history = PositionHistory::new(Position::new());
        for mv in &moves {
            history.push_move(*mv);
        }
        prop_assert_eq!(history.len(), positions.len());
        prop_assert_eq!(history.current(), &positions[positions.len() - 1]);
        for expected in positions.iter().rev().skip(1) {
            history.pop();
            prop_assert_eq!(history.current(), expected);
        }
        prop_assert_eq!(history.current().side_to_move(), Color::White);
    }
}
