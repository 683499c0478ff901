use std::fmt;

use arrayvec::ArrayVec;

use crate::{BoardError, InvalidMoveError};

use super::{
    cell::{Cell, Mark},
    config::{GameConfig, MAX_DIMENSION},
};

/// Columns that can still receive a piece, in ascending order.
pub type LegalMoves = ArrayVec<usize, MAX_DIMENSION>;

/// Grid of cells with gravity-drop semantics.
///
/// Row 0 is the top of the board; pieces settle in the highest-index empty
/// row of their column. The only way to add a piece is [`Board::dropped`]
/// (or its checked variant), so no empty cell ever sits below an occupied
/// one.
///
/// `Board` is a value: dropping a piece returns a new board and leaves the
/// original untouched, which is what lets the search explore sibling
/// branches from the same parent.
///
/// # Example
///
/// ```
/// use connectx_engine::{Board, Cell, GameConfig, Mark};
///
/// let config = GameConfig::default();
/// let board = Board::new(&config);
/// let next = board.dropped(3, Mark::One);
///
/// assert_eq!(next.cell(5, 3), Cell::Occupied(Mark::One));
/// assert_eq!(board.cell(5, 3), Cell::Empty);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: [[Cell; MAX_DIMENSION]; MAX_DIMENSION],
}

impl Board {
    /// Creates an empty board sized by `config`.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rows: config.rows(),
            columns: config.columns(),
            cells: [[Cell::Empty; MAX_DIMENSION]; MAX_DIMENSION],
        }
    }

    /// Builds a board from row-major wire values (`0` empty, `1`/`2` marks).
    ///
    /// Rejects boards of the wrong size, unknown cell values and pieces that
    /// float above an empty cell.
    pub fn from_flat(config: &GameConfig, values: &[u8]) -> Result<Self, BoardError> {
        if values.len() != config.cell_count() {
            return Err(BoardError::WrongLength {
                expected: config.cell_count(),
                actual: values.len(),
            });
        }

        let mut board = Self::new(config);
        for (index, &value) in values.iter().enumerate() {
            let cell = Cell::from_u8(value).ok_or(BoardError::InvalidCell { index, value })?;
            board.cells[index / config.columns()][index % config.columns()] = cell;
        }

        for column in 0..board.columns {
            let mut seen_piece = false;
            for row in 0..board.rows {
                match board.cells[row][column] {
                    Cell::Occupied(_) => seen_piece = true,
                    Cell::Empty if seen_piece => {
                        return Err(BoardError::FloatingPiece {
                            row: row - 1,
                            column,
                        });
                    }
                    Cell::Empty => {}
                }
            }
        }

        Ok(board)
    }

    /// Row-major wire values, the inverse of [`Board::from_flat`].
    #[must_use]
    pub fn to_flat(&self) -> Vec<u8> {
        self.rows_iter()
            .flat_map(|row| row.iter().map(|cell| cell.to_u8()))
            .collect()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the cell at `(row, column)`; row 0 is the top.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells[row][column]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells[..self.rows]
            .iter()
            .map(|row| &row[..self.columns])
    }

    #[must_use]
    pub fn is_legal(&self, column: usize) -> bool {
        column < self.columns && self.cells[0][column].is_empty()
    }

    /// Columns whose top cell is empty, ascending.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        (0..self.columns).filter(|&c| self.is_legal(c)).collect()
    }

    /// True when the top row has no empty cell.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells[0][..self.columns].iter().all(|c| !c.is_empty())
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.rows_iter()
            .flat_map(|row| row.iter())
            .filter(|c| !c.is_empty())
            .count()
    }

    /// Row a piece dropped into `column` would land on, if the column has room.
    #[must_use]
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.cells[row][column].is_empty())
    }

    /// Returns a copy of this board with `mark` dropped into `column`.
    ///
    /// The caller must only pass a column from [`Board::legal_moves`]; search
    /// code relies on that gate instead of paying for a check on every node.
    #[must_use]
    pub fn dropped(&self, column: usize, mark: Mark) -> Self {
        let mut next = self.clone();
        next.drop_in_place(column, mark);
        next
    }

    /// Like [`Board::dropped`], but validates the column first.
    pub fn try_dropped(&self, column: usize, mark: Mark) -> Result<Self, InvalidMoveError> {
        if column >= self.columns {
            return Err(InvalidMoveError::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        if !self.is_legal(column) {
            return Err(InvalidMoveError::ColumnFull(column));
        }
        Ok(self.dropped(column, mark))
    }

    fn drop_in_place(&mut self, column: usize, mark: Mark) {
        debug_assert!(self.is_legal(column), "drop into full column {column}");
        let row = (0..self.rows)
            .rev()
            .find(|&row| self.cells[row][column].is_empty())
            .unwrap_or(0);
        self.cells[row][column] = Cell::Occupied(mark);
    }

    /// Returns the board with every piece handed to the other player.
    #[must_use]
    pub fn with_swapped_marks(&self) -> Self {
        let mut swapped = self.clone();
        for row in &mut swapped.cells[..self.rows] {
            for cell in &mut row[..self.columns] {
                if let Cell::Occupied(mark) = *cell {
                    *cell = Cell::Occupied(mark.opponent());
                }
            }
        }
        swapped
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("cells", &self.to_flat())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(Mark::One) => 'X',
                    Cell::Occupied(Mark::Two) => 'O',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        for column in 0..self.columns {
            if column > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", column % 10)?;
        }
        Ok(())
    }
}
