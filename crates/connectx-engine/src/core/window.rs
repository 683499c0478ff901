use arrayvec::ArrayVec;

use super::{
    board::Board,
    cell::{Cell, Mark},
    config::MAX_IN_A_ROW,
};

/// Scan direction of a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Down and to the right (↘).
    DiagonalDown,
    /// Up and to the right (↗).
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];
}

/// `inarow` consecutive cells read along one direction.
///
/// Windows are produced by [`windows`] and are never stored on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    direction: Direction,
    start: (usize, usize),
    cells: ArrayVec<Cell, MAX_IN_A_ROW>,
}

impl Window {
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `(row, column)` of the first cell.
    #[must_use]
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// True when the window holds exactly `num_discs` of `mark` and every
    /// other cell is empty.
    #[must_use]
    pub fn holds_exactly(&self, num_discs: usize, mark: Mark) -> bool {
        let own = self.count(Cell::Occupied(mark));
        let empty = self.count(Cell::Empty);
        own == num_discs && empty == self.cells.len() - num_discs
    }

    /// The mark filling every cell of the window, if any.
    #[must_use]
    pub fn connection(&self) -> Option<Mark> {
        let first = self.cells.first()?.mark()?;
        self.cells
            .iter()
            .all(|&c| c == Cell::Occupied(first))
            .then_some(first)
    }
}

/// Enumerates every run of `inarow` cells on `board`.
///
/// Order is horizontal, vertical, diagonal ↘, then diagonal ↗. Within one
/// direction, starting cells are visited top-to-bottom, left-to-right (the ↗
/// runs start at their bottom-left cell, so their first start row is
/// `inarow - 1`). The sequence is a pure function of the board and can be
/// enumerated again at will.
///
/// # Example
///
/// ```
/// use connectx_engine::{Board, GameConfig, windows};
///
/// let config = GameConfig::default();
/// let board = Board::new(&config);
/// // 24 horizontal + 21 vertical + 12 + 12 diagonal runs on a 6x7 board.
/// assert_eq!(windows(&board, config.inarow()).count(), 69);
/// ```
pub fn windows(board: &Board, inarow: usize) -> impl Iterator<Item = Window> + '_ {
    debug_assert!((1..=MAX_IN_A_ROW).contains(&inarow));
    Direction::ALL
        .into_iter()
        .flat_map(move |direction| {
            starts(board, inarow, direction).map(move |start| (direction, start))
        })
        .map(move |(direction, start)| read_window(board, inarow, direction, start))
}

/// Valid starting cells for `direction`, row-major.
fn starts(
    board: &Board,
    inarow: usize,
    direction: Direction,
) -> impl Iterator<Item = (usize, usize)> + use<> {
    let (rows, columns) = (board.rows(), board.columns());
    let span = inarow - 1;
    let (row_range, column_end) = match direction {
        Direction::Horizontal => (0..rows, columns.saturating_sub(span)),
        Direction::Vertical => (0..rows.saturating_sub(span), columns),
        Direction::DiagonalDown => (
            0..rows.saturating_sub(span),
            columns.saturating_sub(span),
        ),
        Direction::DiagonalUp => (span.min(rows)..rows, columns.saturating_sub(span)),
    };
    row_range.flat_map(move |row| (0..column_end).map(move |column| (row, column)))
}

fn read_window(
    board: &Board,
    inarow: usize,
    direction: Direction,
    start: (usize, usize),
) -> Window {
    let (row, column) = start;
    let cells = (0..inarow)
        .map(|i| {
            let r = match direction {
                Direction::Horizontal => row,
                Direction::Vertical | Direction::DiagonalDown => row + i,
                Direction::DiagonalUp => row - i,
            };
            let c = match direction {
                Direction::Vertical => column,
                _ => column + i,
            };
            board.cell(r, c)
        })
        .collect();
    Window {
        direction,
        start,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;

    fn count_by_direction(board: &Board, inarow: usize, direction: Direction) -> usize {
        windows(board, inarow)
            .filter(|w| w.direction() == direction)
            .count()
    }

    #[test]
    fn test_window_counts_on_connect_four() {
        let config = GameConfig::CONNECT_FOUR;
        let board = Board::new(&config);
        assert_eq!(count_by_direction(&board, 4, Direction::Horizontal), 24);
        assert_eq!(count_by_direction(&board, 4, Direction::Vertical), 21);
        assert_eq!(count_by_direction(&board, 4, Direction::DiagonalDown), 12);
        assert_eq!(count_by_direction(&board, 4, Direction::DiagonalUp), 12);
        assert!(windows(&board, 4).all(|w| w.cells().len() == 4));
    }

    #[test]
    fn test_order_is_deterministic() {
        let config = GameConfig::CONNECT_FOUR;
        let board = Board::new(&config).dropped(3, Mark::One);
        let first: Vec<_> = windows(&board, 4).collect();
        let second: Vec<_> = windows(&board, 4).collect();
        assert_eq!(first, second);

        assert_eq!(first[0].direction(), Direction::Horizontal);
        assert_eq!(first[0].start(), (0, 0));
        assert_eq!(first[1].start(), (0, 1));
        assert_eq!(first[24].direction(), Direction::Vertical);
        assert_eq!(first[24].start(), (0, 0));
        assert_eq!(first[45].direction(), Direction::DiagonalDown);
        assert_eq!(first[57].direction(), Direction::DiagonalUp);
        assert_eq!(first[57].start(), (3, 0));
    }

    #[test]
    fn test_diagonal_up_reads_bottom_left_to_top_right() {
        let config = GameConfig::CONNECT_FOUR;
        let board = Board::new(&config).dropped(0, Mark::Two);
        let window = windows(&board, 4)
            .find(|w| w.direction() == Direction::DiagonalUp && w.start() == (5, 0))
            .unwrap();
        assert_eq!(window.cells()[0], Cell::Occupied(Mark::Two));
        assert_eq!(window.count(Cell::Empty), 3);
    }

    #[test]
    fn test_holds_exactly_requires_empty_remainder() {
        let config = GameConfig::CONNECT_FOUR;
        let board = Board::new(&config)
            .dropped(0, Mark::One)
            .dropped(1, Mark::One)
            .dropped(2, Mark::One);
        let bottom_left = windows(&board, 4)
            .find(|w| w.direction() == Direction::Horizontal && w.start() == (5, 0))
            .unwrap();
        assert!(bottom_left.holds_exactly(3, Mark::One));
        assert!(!bottom_left.holds_exactly(3, Mark::Two));

        let blocked = board.dropped(3, Mark::Two);
        let bottom_left = windows(&blocked, 4)
            .find(|w| w.direction() == Direction::Horizontal && w.start() == (5, 0))
            .unwrap();
        assert!(!bottom_left.holds_exactly(3, Mark::One));
        assert_eq!(bottom_left.connection(), None);
    }

    #[test]
    fn test_connection() {
        let config = GameConfig::CONNECT_FOUR;
        let mut board = Board::new(&config);
        for _ in 0..4 {
            board = board.dropped(6, Mark::Two);
        }
        let winning: Vec<_> = windows(&board, 4)
            .filter_map(|w| w.connection())
            .collect();
        assert_eq!(winning, vec![Mark::Two]);
    }

    #[test]
    fn test_run_longer_than_one_side() {
        // 5 in a row on a 2x6 board only fits horizontally.
        let config = GameConfig::new(2, 6, 5).unwrap();
        let board = Board::new(&config);
        assert_eq!(windows(&board, 5).count(), 4);
        assert!(windows(&board, 5).all(|w| w.direction() == Direction::Horizontal));
    }
}
