//! Decision-making agents for ConnectX.
//!
//! This crate layers three levels on top of `connectx-engine`:
//!
//! 1. **Board Evaluation** ([`heuristic`]) - Scores a board from one player's point of view
//!    using weighted counts of nearly complete and complete windows.
//!
//! 2. **Search** ([`search`]) - Depth-bounded minimax over simulated drops, scoring each
//!    candidate column by the best value reachable from it.
//!
//! 3. **Move Selection** ([`agent`]) - Agents that turn scores or simple rules into a
//!    column, breaking ties uniformly at random.
//!
//! # Architecture
//!
//! ```text
//! Agent (select a column)
//!     ↓ uses
//! MinimaxSearch (score each column)
//!     ↓ uses
//! BoardEvaluator (score a single board)
//! ```
//!
//! Around them sit the harness contract ([`harness`]), which accepts the flat
//! `observation`/`configuration` pair a game runner sends, and the [`arena`], which
//! plays two agents against each other and tallies the results.
//!
//! # Randomness
//!
//! Agents never own a random number generator. Every call receives one, so a
//! seeded generator (see [`connectx_engine::GameSeed`]) makes whole matches
//! reproducible.
//!
//! # Example
//!
//! ```
//! use connectx_agent::{agent::{Agent, MinimaxAgent}, search::MinimaxConfig};
//! use connectx_engine::{Board, GameConfig, GameSeed, Mark};
//!
//! let config = GameConfig::default();
//! let board = Board::new(&config);
//! let agent = MinimaxAgent::new(MinimaxConfig::default());
//!
//! let mut rng = GameSeed::from_u128(7).rng();
//! let column = agent.select_column(&board, Mark::One, &config, &mut rng).unwrap();
//! assert!(board.is_legal(column));
//! ```

use connectx_engine::BoardError;

pub mod agent;
pub mod arena;
pub mod harness;
pub mod heuristic;
pub mod search;

/// Reasons an agent cannot produce a column.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AgentError {
    /// The board has no empty column; the game should already be over.
    #[display("no legal moves: the board is full")]
    NoLegalMoves,
    #[display("invalid observation board: {_0}")]
    InvalidBoard(BoardError),
    #[display("invalid mark {_0}: expected 1 or 2")]
    #[from(ignore)]
    InvalidMark(#[error(not(source))] u8),
}
