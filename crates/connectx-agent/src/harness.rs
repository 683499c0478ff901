//! Entry point used by an external game runner.
//!
//! The runner sends two JSON objects per turn:
//!
//! ```json
//! { "board": [0, 0, 1, ...], "mark": 1 }
//! { "rows": 6, "columns": 7, "inarow": 4 }
//! ```
//!
//! `board` is the grid flattened row-major from the top-left cell, with `0`
//! for an empty cell and the player numbers `1` and `2`. [`act`] answers with
//! a column index.

use connectx_engine::{Board, GameConfig, Mark};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{AgentError, agent::Agent};

/// The state a runner sends to the player about to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub board: Vec<u8>,
    pub mark: u8,
}

impl Observation {
    #[must_use]
    pub fn new(board: &Board, mark: Mark) -> Self {
        Self {
            board: board.to_flat(),
            mark: mark.to_u8(),
        }
    }

    /// Decodes and validates the flat board against `config`.
    pub fn to_board(&self, config: &GameConfig) -> Result<Board, AgentError> {
        Ok(Board::from_flat(config, &self.board)?)
    }

    pub fn to_mark(&self) -> Result<Mark, AgentError> {
        Mark::from_u8(self.mark).ok_or(AgentError::InvalidMark(self.mark))
    }
}

/// Picks a column for the observed position.
///
/// The returned column is always open on the observed board.
pub fn act(
    observation: &Observation,
    config: &GameConfig,
    agent: &dyn Agent,
    rng: &mut dyn RngCore,
) -> Result<usize, AgentError> {
    let board = observation.to_board(config)?;
    let mark = observation.to_mark()?;
    let column = agent.select_column(&board, mark, config, rng)?;
    debug_assert!(board.is_legal(column));
    tracing::debug!(agent = agent.name(), %mark, column, "act");
    Ok(column)
}
