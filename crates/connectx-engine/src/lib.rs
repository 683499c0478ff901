//! Board model and game rules for ConnectX (Connect Four on an arbitrary grid).
//!
//! - [`core`] holds the data structures every agent works on: [`GameConfig`],
//!   [`Mark`]/[`Cell`], the value-semantics [`Board`], the [`windows`] scanner
//!   and the terminal/win detection rules.
//! - [`engine`] holds the game flow built on top of them: [`GameSession`] and
//!   the [`GameSeed`] used to make every random decision reproducible.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected [`GameConfig`] parameters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("rows must be in 1..={MAX_DIMENSION}, got {_0}")]
    InvalidRows(#[error(not(source))] usize),
    #[display("columns must be in 1..={MAX_DIMENSION}, got {_0}")]
    InvalidColumns(#[error(not(source))] usize),
    #[display("inarow must be in 2..={MAX_IN_A_ROW} and fit on the board, got {inarow} for {rows}x{columns}")]
    InvalidInarow {
        rows: usize,
        columns: usize,
        inarow: usize,
    },
}

/// A flat board that cannot be turned into a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board has {actual} cells, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
    #[display("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },
    #[display("floating piece at row {row}, column {column}")]
    FloatingPiece { row: usize, column: usize },
}

/// A move that cannot be played on the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMoveError {
    #[display("column {column} is out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[display("column {_0} is full")]
    ColumnFull(#[error(not(source))] usize),
}

/// A move attempted after the game already finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("game is already over")]
pub struct GameOverError;

/// Any reason a [`GameSession`] refuses a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PlayError {
    #[display("{_0}")]
    InvalidMove(InvalidMoveError),
    #[display("{_0}")]
    GameOver(GameOverError),
}
