use std::fmt;
use std::time::Duration;

use super::constants::{MATE_SCORE, MATE_THRESHOLD};
use crate::board::Move;

/// Report for one completed iterative-deepening iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    /// Root score from the side to move's point of view
    pub score: i32,
    pub best_move: Move,
    /// Nodes visited since the search started
    pub nodes: u64,
    pub elapsed: Duration,
    pub nps: u64,
    /// Transposition table fill, per mille; `None` with the table disabled
    pub hashfull: Option<u32>,
}

impl SearchInfo {
    /// Signed distance to mate in full moves, if the score is a mate score.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        if self.score >= MATE_THRESHOLD {
            Some((MATE_SCORE - self.score + 1) / 2)
        } else if self.score <= -MATE_THRESHOLD {
            Some(-(MATE_SCORE + self.score) / 2)
        } else {
            None
        }
    }
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth {} score ", self.depth)?;
        match self.mate_in() {
            Some(moves) => write!(f, "mate {moves}")?,
            None => write!(f, "cp {}", self.score)?,
        }
        write!(
            f,
            " nodes {} nps {} time {}",
            self.nodes,
            self.nps,
            self.elapsed.as_millis()
        )?;
        if let Some(hashfull) = self.hashfull {
            write!(f, " hashfull {hashfull}")?;
        }
        write!(f, " pv {}", self.best_move)
    }
}

/// Receives a [`SearchInfo`] after every completed iteration.
pub trait SearchLogger {
    fn info(&self, info: &SearchInfo);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn info(score: i32) -> SearchInfo {
        SearchInfo {
            depth: 3,
            score,
            best_move: Move::new(Square(1, 4), Square(3, 4)),
            nodes: 1200,
            elapsed: Duration::from_millis(12),
            nps: 100_000,
            hashfull: Some(4),
        }
    }

    #[test]
    fn test_mate_distance() {
        assert_eq!(info(35).mate_in(), None);
        assert_eq!(info(MATE_SCORE - 1).mate_in(), Some(1));
        assert_eq!(info(MATE_SCORE - 3).mate_in(), Some(2));
        assert_eq!(info(-(MATE_SCORE - 2)).mate_in(), Some(-1));
    }

    #[test]
    fn test_display_line() {
        assert_eq!(
            info(35).to_string(),
            "depth 3 score cp 35 nodes 1200 nps 100000 time 12 hashfull 4 pv e2e4"
        );
        assert!(info(MATE_SCORE - 1).to_string().contains("score mate 1"));
    }
}
