//! Board evaluation: scoring a position from one player's point of view.
//!
//! The score is a weighted sum of window counts. For a connect length `N` and
//! a perspective `mark` (opponent `opp`):
//!
//! - `threes(m)` - windows with exactly `N-1` pieces of `m`, the rest empty
//! - `fours(m)` - windows with exactly `N` pieces of `m` (a completed run)
//!
//! Two named strategies exist:
//!
//! ```text
//! Simple:        threes(mark) - 100·threes(opp)                  + 1_000_000·fours(mark)
//! MinimaxTuned:  threes(mark) - 100·threes(opp) - 10_000·fours(opp) + 1_000_000·fours(mark)
//! ```
//!
//! The weights form a strict hierarchy (1 < 100 < 10 000 < 1 000 000): a won
//! position outranks any positional advantage, and the tuned variant also
//! punishes positions where the opponent has already won so that the search
//! steers away from losing lines instead of merely rewarding them less.
//!
//! For `N = 4` the counted windows are the usual "three in a row with one gap"
//! and "four in a row".

use std::{fmt, str::FromStr};

use connectx_engine::{Board, Cell, GameConfig, Mark, windows};

/// Weight of one of our `N-1` windows.
pub const THREE_WEIGHT: f64 = 1.0;
/// Penalty for one of the opponent's `N-1` windows.
pub const OPPONENT_THREE_WEIGHT: f64 = 1e2;
/// Penalty for one of the opponent's completed runs ([`Heuristic::MinimaxTuned`] only).
pub const OPPONENT_FOUR_WEIGHT: f64 = 1e4;
/// Reward for one of our completed runs.
pub const FOUR_WEIGHT: f64 = 1e6;

/// Scores boards for the search and the greedy agent.
///
/// Implementations must be pure: the same board, mark and configuration
/// always give the same score.
pub trait BoardEvaluator: fmt::Debug + Send + Sync {
    /// Scores `board` from `mark`'s point of view (higher is better for `mark`).
    fn evaluate(&self, board: &Board, mark: Mark, config: &GameConfig) -> f64;
}

/// Counts the windows holding exactly `num_discs` pieces of `mark` with every
/// other cell empty.
///
/// # Example
///
/// ```
/// use connectx_agent::heuristic::count_windows;
/// use connectx_engine::{Board, GameConfig, Mark};
///
/// let config = GameConfig::default();
/// let mut board = Board::new(&config);
/// for column in 0..3 {
///     board = board.dropped(column, Mark::One);
/// }
/// // Only the bottom-left horizontal window is X X X _.
/// assert_eq!(count_windows(&board, 3, Mark::One, &config), 1);
/// ```
#[must_use]
pub fn count_windows(board: &Board, num_discs: usize, mark: Mark, config: &GameConfig) -> usize {
    windows(board, config.inarow())
        .filter(|w| w.holds_exactly(num_discs, mark))
        .count()
}

/// Every count the heuristics need, gathered in one pass over the windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCounts {
    pub threes: usize,
    pub fours: usize,
    pub opponent_threes: usize,
    pub opponent_fours: usize,
}

impl WindowCounts {
    #[must_use]
    pub fn scan(board: &Board, mark: Mark, config: &GameConfig) -> Self {
        let inarow = config.inarow();
        let own = Cell::Occupied(mark);
        let opponent = Cell::Occupied(mark.opponent());

        let mut counts = Self::default();
        for window in windows(board, inarow) {
            let empty = window.count(Cell::Empty);
            let pieces = inarow - empty;
            if pieces < inarow - 1 {
                continue;
            }
            let own_count = window.count(own);
            let opponent_count = window.count(opponent);
            match (own_count, opponent_count) {
                (n, 0) if n == inarow => counts.fours += 1,
                (n, 0) if n == inarow - 1 => counts.threes += 1,
                (0, n) if n == inarow => counts.opponent_fours += 1,
                (0, n) if n == inarow - 1 => counts.opponent_threes += 1,
                _ => {}
            }
        }
        counts
    }
}

/// The two named scoring strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Ignores the opponent's completed runs; used by the one-step greedy agent.
    Simple,
    /// Adds the opponent-win penalty; used at the leaves of the minimax search.
    #[default]
    MinimaxTuned,
}

impl Heuristic {
    /// Applies this strategy's weights to pre-computed counts.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score(self, counts: &WindowCounts) -> f64 {
        let base = counts.threes as f64 * THREE_WEIGHT
            - counts.opponent_threes as f64 * OPPONENT_THREE_WEIGHT
            + counts.fours as f64 * FOUR_WEIGHT;
        match self {
            Heuristic::Simple => base,
            Heuristic::MinimaxTuned => base - counts.opponent_fours as f64 * OPPONENT_FOUR_WEIGHT,
        }
    }
}

impl BoardEvaluator for Heuristic {
    #[inline]
    fn evaluate(&self, board: &Board, mark: Mark, config: &GameConfig) -> f64 {
        self.score(&WindowCounts::scan(board, mark, config))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Heuristic::Simple => "simple",
            Heuristic::MinimaxTuned => "minimax-tuned",
        })
    }
}

/// Heuristic name other than `simple` or `minimax-tuned`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown heuristic {_0:?} (expected `simple` or `minimax-tuned`)")]
pub struct ParseHeuristicError(#[error(not(source))] String);

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Heuristic::Simple),
            "minimax-tuned" | "minimax_tuned" | "tuned" => Ok(Heuristic::MinimaxTuned),
            _ => Err(ParseHeuristicError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use connectx_engine::has_connection;

    use super::*;

    fn play(config: &GameConfig, moves: &[(usize, Mark)]) -> Board {
        moves
            .iter()
            .fold(Board::new(config), |board, &(column, mark)| {
                board.dropped(column, mark)
            })
    }

    /// Plays a random sequence of legal moves, stopping at the first win.
    fn random_board(config: &GameConfig, columns: &[usize]) -> Board {
        let mut board = Board::new(config);
        let mut mark = Mark::One;
        for &column in columns {
            let column = column % config.columns();
            if !board.is_legal(column) {
                continue;
            }
            board = board.dropped(column, mark);
            if has_connection(&board, mark, config.inarow()) {
                break;
            }
            mark = mark.opponent();
        }
        board
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let config = GameConfig::CONNECT_FOUR;
        let board = Board::new(&config);
        for heuristic in [Heuristic::Simple, Heuristic::MinimaxTuned] {
            assert_eq!(heuristic.evaluate(&board, Mark::One, &config), 0.0);
        }
    }

    #[test]
    fn test_own_three_and_opponent_three() {
        let config = GameConfig::CONNECT_FOUR;
        let board = play(&config, &[(0, Mark::One), (0, Mark::One), (0, Mark::One)]);
        // Only the vertical window covering rows 2..=5 of column 0.
        let counts = WindowCounts::scan(&board, Mark::One, &config);
        assert_eq!(counts.threes, 1);
        assert_eq!(counts.opponent_threes, 0);
        assert_eq!(Heuristic::Simple.evaluate(&board, Mark::One, &config), 1.0);
        assert_eq!(Heuristic::Simple.evaluate(&board, Mark::Two, &config), -100.0);
    }

    #[test]
    fn test_tuned_penalises_opponent_win() {
        let config = GameConfig::CONNECT_FOUR;
        let board = play(
            &config,
            &[
                (0, Mark::Two),
                (1, Mark::Two),
                (2, Mark::Two),
                (3, Mark::Two),
            ],
        );
        let counts = WindowCounts::scan(&board, Mark::One, &config);
        assert_eq!(counts.opponent_fours, 1);
        let simple = Heuristic::Simple.evaluate(&board, Mark::One, &config);
        let tuned = Heuristic::MinimaxTuned.evaluate(&board, Mark::One, &config);
        assert_eq!(simple - tuned, OPPONENT_FOUR_WEIGHT);
    }

    #[test]
    fn test_window_with_mixed_pieces_counts_for_nobody() {
        let config = GameConfig::CONNECT_FOUR;
        let board = play(
            &config,
            &[
                (0, Mark::One),
                (1, Mark::One),
                (2, Mark::One),
                (3, Mark::Two),
            ],
        );
        assert_eq!(count_windows(&board, 3, Mark::One, &config), 0);
        assert_eq!(count_windows(&board, 4, Mark::One, &config), 0);
    }

    #[test]
    fn test_parse_and_display() {
        for heuristic in [Heuristic::Simple, Heuristic::MinimaxTuned] {
            assert_eq!(heuristic.to_string().parse::<Heuristic>(), Ok(heuristic));
        }
        assert_eq!("Tuned".parse::<Heuristic>(), Ok(Heuristic::MinimaxTuned));
        assert!("greedy".parse::<Heuristic>().is_err());
    }

    proptest! {
        #[test]
        fn window_counts_match_count_windows(columns in proptest::collection::vec(0usize..7, 0..42)) {
            let config = GameConfig::CONNECT_FOUR;
            let board = random_board(&config, &columns);
            for mark in Mark::ALL {
                let counts = WindowCounts::scan(&board, mark, &config);
                prop_assert_eq!(counts.threes, count_windows(&board, 3, mark, &config));
                prop_assert_eq!(counts.fours, count_windows(&board, 4, mark, &config));
                prop_assert_eq!(counts.opponent_threes, count_windows(&board, 3, mark.opponent(), &config));
                prop_assert_eq!(counts.opponent_fours, count_windows(&board, 4, mark.opponent(), &config));
            }
        }

        #[test]
        fn full_window_count_agrees_with_win_check(columns in proptest::collection::vec(0usize..7, 0..42)) {
            let config = GameConfig::CONNECT_FOUR;
            let board = random_board(&config, &columns);
            for mark in Mark::ALL {
                prop_assert_eq!(
                    count_windows(&board, config.inarow(), mark, &config) > 0,
                    has_connection(&board, mark, config.inarow())
                );
            }
        }

        #[test]
        fn own_connection_dominates_everything_else(
            winning in proptest::collection::vec(0usize..7, 0..42),
            other in proptest::collection::vec(0usize..7, 0..42),
        ) {
            let config = GameConfig::CONNECT_FOUR;
            let a = random_board(&config, &winning);
            let b = random_board(&config, &other);
            for mark in Mark::ALL {
                let a_wins = count_windows(&a, 4, mark, &config) > 0;
                let b_wins = count_windows(&b, 4, mark, &config) > 0;
                if a_wins && !b_wins {
                    for heuristic in [Heuristic::Simple, Heuristic::MinimaxTuned] {
                        prop_assert!(
                            heuristic.evaluate(&a, mark, &config) > heuristic.evaluate(&b, mark, &config)
                        );
                    }
                }
            }
        }
    }
}
