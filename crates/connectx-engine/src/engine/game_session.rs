use crate::{
    GameOverError, PlayError,
    core::{
        board::Board,
        cell::Mark,
        config::GameConfig,
        rules::has_connection,
    },
};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Outcome {
    Winner(Mark),
    Draw,
}

/// A game in progress.
///
/// Owns the board, tracks whose turn it is, records every column played and
/// detects the end of the game after each move. [`Mark::One`] moves first.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    to_move: Mark,
    history: Vec<usize>,
    outcome: Option<Outcome>,
}

impl GameSession {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(&config),
            config,
            to_move: Mark::One,
            history: vec![],
            outcome: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Columns played so far, in order.
    #[must_use]
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Drops the current player's piece into `column` and passes the turn.
    ///
    /// Returns the outcome if this move ended the game.
    pub fn play(&mut self, column: usize) -> Result<Option<Outcome>, PlayError> {
        if self.is_over() {
            return Err(GameOverError.into());
        }
        let mark = self.to_move;
        self.board = self.board.try_dropped(column, mark)?;
        self.history.push(column);

        // Only the mover can have completed a run.
        if has_connection(&self.board, mark, self.config.inarow()) {
            self.outcome = Some(Outcome::Winner(mark));
        } else if self.board.is_full() {
            self.outcome = Some(Outcome::Draw);
        }
        self.to_move = mark.opponent();
        Ok(self.outcome)
    }
}
