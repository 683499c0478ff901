//! Game flow on top of the core data structures.
//!
//! - [`GameSession`] - A game in progress: board, side to move, move history,
//!   and the [`Outcome`] once the game ends
//! - [`GameSeed`] - Seed for the random number generator that drives every
//!   tie-break, so a whole match can be replayed
//!
//! # Example
//!
//! ```
//! use connectx_engine::{GameConfig, GameSession, Mark, Outcome};
//!
//! let mut session = GameSession::new(GameConfig::default());
//! for column in [0, 1, 0, 1, 0, 1, 0] {
//!     session.play(column).unwrap();
//! }
//!
//! assert_eq!(session.outcome(), Some(Outcome::Winner(Mark::One)));
//! assert!(session.play(2).is_err());
//! ```

pub use self::{game_seed::*, game_session::*};

mod game_seed;
mod game_session;
