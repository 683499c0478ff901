//! Terminal-state and win detection.

use super::{board::Board, cell::Mark, config::GameConfig, window::windows};

/// True when the game on `board` is over: the top row is full (draw) or some
/// window is a connect-N for either mark.
///
/// Does not say who won; see [`winner`] for that.
#[must_use]
pub fn is_terminal(board: &Board, config: &GameConfig) -> bool {
    board.is_full() || windows(board, config.inarow()).any(|w| w.connection().is_some())
}

/// True when `mark` has at least one connect-N on `board`.
#[must_use]
pub fn has_connection(board: &Board, mark: Mark, inarow: usize) -> bool {
    windows(board, inarow).any(|w| w.connection() == Some(mark))
}

/// The mark owning the first connect-N found, if any.
///
/// Positions reached by legal play contain at most one winner.
#[must_use]
pub fn winner(board: &Board, config: &GameConfig) -> Option<Mark> {
    windows(board, config.inarow()).find_map(|w| w.connection())
}

/// True when dropping `mark` into `column` gives `mark` a connect-N.
///
/// `column` must be legal on `board`.
///
/// # Example
///
/// ```
/// use connectx_engine::{Board, GameConfig, Mark, is_winning_move};
///
/// let config = GameConfig::default();
/// let mut board = Board::new(&config);
/// for _ in 0..3 {
///     board = board.dropped(3, Mark::One);
/// }
/// assert!(is_winning_move(&board, 3, Mark::One, &config));
/// assert!(!is_winning_move(&board, 3, Mark::Two, &config));
/// ```
#[must_use]
pub fn is_winning_move(board: &Board, column: usize, mark: Mark, config: &GameConfig) -> bool {
    has_connection(&board.dropped(column, mark), mark, config.inarow())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(config: &GameConfig, moves: &[(usize, Mark)]) -> Board {
        moves
            .iter()
            .fold(Board::new(config), |board, &(column, mark)| {
                board.dropped(column, mark)
            })
    }

    #[test]
    fn test_empty_board_is_not_terminal() {
        let config = GameConfig::CONNECT_FOUR;
        assert!(!is_terminal(&Board::new(&config), &config));
        assert_eq!(winner(&Board::new(&config), &config), None);
    }

    #[test]
    fn test_horizontal_win() {
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
        assert!(is_terminal(&board, &config));
        assert_eq!(winner(&board, &config), Some(Mark::Two));
        assert!(has_connection(&board, Mark::Two, 4));
        assert!(!has_connection(&board, Mark::One, 4));
    }

    #[test]
    fn test_diagonal_wins() {
        let config = GameConfig::CONNECT_FOUR;
        // ↗ from (5, 0) to (2, 3)
        let board = play(
            &config,
            &[
                (0, Mark::One),
                (1, Mark::Two),
                (1, Mark::One),
                (2, Mark::Two),
                (2, Mark::Two),
                (2, Mark::One),
                (3, Mark::Two),
                (3, Mark::Two),
                (3, Mark::Two),
            ],
        );
        assert!(!is_terminal(&board, &config));
        assert!(is_winning_move(&board, 3, Mark::One, &config));
        let board = board.dropped(3, Mark::One);
        assert_eq!(winner(&board, &config), Some(Mark::One));

        // ↘ mirrored onto the right-hand side
        let board = play(
            &config,
            &[
                (6, Mark::One),
                (5, Mark::Two),
                (5, Mark::One),
                (4, Mark::Two),
                (4, Mark::Two),
                (4, Mark::One),
                (3, Mark::Two),
                (3, Mark::Two),
                (3, Mark::Two),
                (3, Mark::One),
            ],
        );
        assert_eq!(winner(&board, &config), Some(Mark::One));
    }

    #[test]
    fn test_full_board_without_winner_is_terminal() {
        let config = GameConfig::new(1, 3, 3).unwrap();
        let board = play(&config, &[(0, Mark::One), (1, Mark::Two)]);
        assert!(!is_terminal(&board, &config));

        let board = board.dropped(2, Mark::One);
        assert!(board.is_full());
        assert_eq!(winner(&board, &config), None);
        assert!(is_terminal(&board, &config));
    }

    #[test]
    fn test_winning_move_does_not_mutate_board() {
        let config = GameConfig::CONNECT_FOUR;
        let board = play(&config, &[(3, Mark::One), (3, Mark::One), (3, Mark::One)]);
        let before = board.clone();
        assert!(is_winning_move(&board, 3, Mark::One, &config));
        assert_eq!(board, before);
    }
}
