use std::fmt;

use serde::{Deserialize, Serialize};

/// Piece identity of a player.
///
/// The wire encoding used by game harnesses is `1` for [`Mark::One`] and `2`
/// for [`Mark::Two`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
#[repr(u8)]
pub enum Mark {
    One = 1,
    Two = 2,
}

impl Mark {
    pub const ALL: [Self; 2] = [Mark::One, Mark::Two];

    /// The other player's mark (`3 - mark`).
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Mark::One => Mark::Two,
            Mark::Two => Mark::One,
        }
    }

    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a wire value, returning `None` for anything but `1` or `2`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Mark::One),
            2 => Some(Mark::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Mark),
}

impl Cell {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(mark) => mark.to_u8(),
        }
    }

    /// Decodes a wire value (`0`, `1` or `2`).
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            _ => match Mark::from_u8(value) {
                Some(mark) => Some(Cell::Occupied(mark)),
                None => None,
            },
        }
    }

    #[must_use]
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}
