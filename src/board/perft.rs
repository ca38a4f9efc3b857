use super::{Move, Position};

impl Position {
    /// Count the leaf nodes of the legal move tree to `depth` plies.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .iter()
            .map(|&mv| self.apply_move(mv).perft(depth - 1))
            .sum()
    }

    /// Per-root-move leaf counts, for locating a move generator bug.
    #[must_use]
    pub fn perft_divide(&self, depth: u32) -> Vec<(Move, u64)> {
        let child_depth = depth.saturating_sub(1);
        self.legal_moves()
            .iter()
            .map(|&mv| (mv, self.apply_move(mv).perft(child_depth)))
            .collect()
    }
}
