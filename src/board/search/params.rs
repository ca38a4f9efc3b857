use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constants::{MAX_SEARCH_DEPTH, MIN_TIME_BUDGET_MS, MOVES_TO_GO, TIME_OVERHEAD_MS};

/// Tunable search settings, kept in [`SearchState`](super::SearchState)
/// across searches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParams {
    /// Transposition table slot count
    pub tt_entries: usize,
    /// Extra plies allowed per line while the side to move is in check
    pub max_check_extensions: u32,
    /// Nodes between two deadline checks
    pub time_check_interval: u64,
    /// Quiescence delta-pruning margin, in centipawns
    pub delta_margin: i32,
    /// Half-moves without a capture or pawn move that make a draw
    pub fifty_move_limit: u32,
    pub use_tt: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            tt_entries: 1 << 20,
            max_check_extensions: 8,
            time_check_interval: 2048,
            delta_margin: 200,
            fifty_move_limit: 100,
            use_tt: true,
        }
    }
}

/// Depth and time budget for one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest iteration to run, 1..=64
    pub max_depth: u32,
    /// Wall-clock budget; `None` searches until `max_depth` completes
    pub time_budget: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_depth: MAX_SEARCH_DEPTH,
            time_budget: None,
        }
    }
}

impl SearchLimits {
    /// Search to a fixed depth with no time limit
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits {
            max_depth: max_depth.clamp(1, MAX_SEARCH_DEPTH),
            time_budget: None,
        }
    }

    /// Search as deep as `budget` allows
    #[must_use]
    pub fn time(budget: Duration) -> Self {
        SearchLimits {
            max_depth: MAX_SEARCH_DEPTH,
            time_budget: Some(budget),
        }
    }

    /// Budget for one move out of the mover's remaining clock time.
    ///
    /// Assumes 40 moves to go: `time_left / 40 + increment`, less a 5 ms
    /// overhead, and never below 5 ms.
    #[must_use]
    pub fn from_clock(time_left: Duration, increment: Duration) -> Self {
        let share = time_left / MOVES_TO_GO + increment;
        let floor = Duration::from_millis(MIN_TIME_BUDGET_MS);
        let overhead = Duration::from_millis(TIME_OVERHEAD_MS);
        let budget = share.saturating_sub(overhead).max(floor);
        SearchLimits::time(budget)
    }

    /// Replace the depth limit
    #[must_use]
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.clamp(1, MAX_SEARCH_DEPTH);
        self
    }

    /// Replace the time budget
    #[must_use]
    pub fn with_time(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SearchParams::default();
        assert_eq!(params.tt_entries, 1 << 20);
        assert_eq!(params.max_check_extensions, 8);
        assert_eq!(params.time_check_interval, 2048);
        assert_eq!(params.delta_margin, 200);
        assert_eq!(params.fifty_move_limit, 100);
        assert!(params.use_tt);
    }

    #[test]
    fn test_depth_limits_are_clamped() {
        assert_eq!(SearchLimits::depth(0).max_depth, 1);
        assert_eq!(SearchLimits::depth(6).max_depth, 6);
        assert_eq!(SearchLimits::depth(500).max_depth, MAX_SEARCH_DEPTH);
        assert_eq!(SearchLimits::depth(6).time_budget, None);
    }

    #[test]
    fn test_from_clock_budget() {
        let limits = SearchLimits::from_clock(Duration::from_secs(40), Duration::from_millis(500));
        assert_eq!(limits.time_budget, Some(Duration::from_millis(1495)));
        assert_eq!(limits.max_depth, MAX_SEARCH_DEPTH);
    }

    #[test]
    fn test_from_clock_floor() {
        let limits = SearchLimits::from_clock(Duration::from_millis(100), Duration::ZERO);
        assert_eq!(limits.time_budget, Some(Duration::from_millis(5)));
        let empty = SearchLimits::from_clock(Duration::ZERO, Duration::ZERO);
        assert_eq!(empty.time_budget, Some(Duration::from_millis(5)));
    }

    #[test]
    fn test_builders_combine() {
        let limits = SearchLimits::depth(4).with_time(Duration::from_secs(1));
        assert_eq!(limits.max_depth, 4);
        assert_eq!(limits.time_budget, Some(Duration::from_secs(1)));
        assert_eq!(SearchLimits::time(Duration::from_secs(2)).with_depth(3).max_depth, 3);
    }
}
