//! Depth-bounded minimax over simulated drops.
//!
//! [`MinimaxSearch::score_move`] plays a candidate column for `mark` and then
//! runs minimax from the opponent's turn, returning the value the candidate
//! guarantees when both sides play optimally with respect to the leaf
//! heuristic. Every score is taken from `mark`'s point of view, including at
//! nodes where the opponent is to move.
//!
//! A node is a leaf when its remaining depth is zero, the position is
//! terminal, or no column is open. Leaves are scored by a [`BoardEvaluator`].
//!
//! Alpha-beta pruning is available as an option and returns exactly the same
//! values as the plain search. An optional deadline turns every node visited
//! after it into a leaf so that a slow search still answers in time.

use std::{
    ops::{Add, AddAssign},
    time::{Duration, Instant},
};

use connectx_engine::{Board, GameConfig, Mark, is_terminal};

use crate::heuristic::BoardEvaluator;

/// Plies searched by default, counting the candidate move itself.
pub const DEFAULT_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pruning {
    /// Visit every node.
    #[default]
    None,
    /// Skip subtrees that cannot change the result.
    AlphaBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxConfig {
    /// Plies searched from the current position, including the candidate move.
    pub depth: usize,
    pub pruning: Pruning,
    /// Wall-clock budget for one [`MinimaxSearch`]; nodes reached after it
    /// expires are scored statically.
    pub deadline: Option<Duration>,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: Pruning::None,
            deadline: None,
        }
    }
}

impl MinimaxConfig {
    #[must_use]
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, leaves included.
    pub nodes: u64,
    /// Positions scored by the evaluator.
    pub leaves: u64,
    /// Interior positions cut short by the deadline.
    pub deadline_hits: u64,
}

impl Add for SearchStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            nodes: self.nodes + rhs.nodes,
            leaves: self.leaves + rhs.leaves,
            deadline_hits: self.deadline_hits + rhs.deadline_hits,
        }
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// One search session: configuration, leaf evaluator and running counters.
///
/// The deadline clock starts when the session is created.
#[derive(Debug)]
pub struct MinimaxSearch<'a> {
    game: &'a GameConfig,
    config: MinimaxConfig,
    evaluator: &'a dyn BoardEvaluator,
    started: Instant,
    stats: SearchStats,
}

impl<'a> MinimaxSearch<'a> {
    #[must_use]
    pub fn new(
        game: &'a GameConfig,
        config: MinimaxConfig,
        evaluator: &'a dyn BoardEvaluator,
    ) -> Self {
        Self {
            game,
            config,
            evaluator,
            started: Instant::now(),
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scores dropping `mark` into `column`, which must be legal on `board`.
    pub fn score_move(&mut self, board: &Board, column: usize, mark: Mark) -> f64 {
        let next = board.dropped(column, mark);
        let score = self.minimax(&next, self.config.depth.saturating_sub(1), false, mark);
        tracing::trace!(column, score, "scored move");
        score
    }

    /// Scores every legal column, in ascending column order.
    pub fn score_moves(&mut self, board: &Board, mark: Mark) -> Vec<(usize, f64)> {
        board
            .legal_moves()
            .into_iter()
            .map(|column| (column, self.score_move(board, column, mark)))
            .collect()
    }

    /// Value of `board` for `mark` searched `depth` plies deep.
    ///
    /// At maximizing nodes `mark` moves; at minimizing nodes its opponent does.
    pub fn minimax(&mut self, board: &Board, depth: usize, maximizing: bool, mark: Mark) -> f64 {
        match self.config.pruning {
            Pruning::None => self.full(board, depth, maximizing, mark),
            Pruning::AlphaBeta => self.alpha_beta(
                board,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                maximizing,
                mark,
            ),
        }
    }

    fn full(&mut self, board: &Board, depth: usize, maximizing: bool, mark: Mark) -> f64 {
        self.stats.nodes += 1;
        if self.is_leaf(board, depth) {
            return self.evaluate(board, mark);
        }
        let mover = if maximizing { mark } else { mark.opponent() };
        let children = board
            .legal_moves()
            .into_iter()
            .map(|column| board.dropped(column, mover));

        if maximizing {
            let mut value = f64::NEG_INFINITY;
            for child in children {
                value = value.max(self.full(&child, depth - 1, false, mark));
            }
            value
        } else {
            let mut value = f64::INFINITY;
            for child in children {
                value = value.min(self.full(&child, depth - 1, true, mark));
            }
            value
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        mark: Mark,
    ) -> f64 {
        self.stats.nodes += 1;
        if self.is_leaf(board, depth) {
            return self.evaluate(board, mark);
        }
        let mover = if maximizing { mark } else { mark.opponent() };

        if maximizing {
            let mut value = f64::NEG_INFINITY;
            for column in board.legal_moves() {
                let child = board.dropped(column, mover);
                value = value.max(self.alpha_beta(&child, depth - 1, alpha, beta, false, mark));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = f64::INFINITY;
            for column in board.legal_moves() {
                let child = board.dropped(column, mover);
                value = value.min(self.alpha_beta(&child, depth - 1, alpha, beta, true, mark));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }

    fn is_leaf(&mut self, board: &Board, depth: usize) -> bool {
        // A full board is terminal, so a non-terminal board always has a legal move.
        if depth == 0 || is_terminal(board, self.game) {
            return true;
        }
        if self
            .config
            .deadline
            .is_some_and(|limit| self.started.elapsed() >= limit)
        {
            self.stats.deadline_hits += 1;
            return true;
        }
        false
    }

    fn evaluate(&mut self, board: &Board, mark: Mark) -> f64 {
        self.stats.leaves += 1;
        self.evaluator.evaluate(board, mark, self.game)
    }
}
