//! Move selection.
//!
//! Every agent answers the same question: given a board and the mark to play,
//! which column? Agents are stateless between calls and take the random number
//! generator used for tie-breaking as an argument.
//!
//! | Kind       | Agent                                    | Strategy                                          |
//! |------------|------------------------------------------|---------------------------------------------------|
//! | `random`   | [`RandomAgent`]                          | Uniform over open columns                         |
//! | `win`      | [`RuleBasedAgent`] + [`RuleTier::Win`]   | Win now if possible, else random                  |
//! | `block`    | [`RuleBasedAgent`] + [`RuleTier::Block`] | ...else block the opponent's winning column       |
//! | `cautious` | [`RuleBasedAgent`] + [`RuleTier::Avoid`] | ...else avoid columns that hand the opponent a win |
//! | `greedy`   | [`GreedyAgent`]                          | Best one-step heuristic score                     |
//! | `minimax`  | [`MinimaxAgent`]                         | Best minimax score                                |

use std::fmt;

use connectx_engine::{Board, GameConfig, LegalMoves, Mark, is_winning_move};
use rand::{RngCore, seq::IndexedRandom};

use crate::{
    AgentError,
    heuristic::{BoardEvaluator, Heuristic},
    search::{MinimaxConfig, MinimaxSearch, SearchStats},
};

/// Chooses a column for the mark to play.
pub trait Agent: fmt::Debug + Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Returns a legal column of `board` for `mark`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoLegalMoves`] when every column is full.
    fn select_column(
        &self,
        board: &Board,
        mark: Mark,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AgentError>;
}

fn legal_moves(board: &Board) -> Result<LegalMoves, AgentError> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return Err(AgentError::NoLegalMoves);
    }
    Ok(moves)
}

fn choose(candidates: &[usize], rng: &mut dyn RngCore) -> Result<usize, AgentError> {
    candidates
        .choose(rng)
        .copied()
        .ok_or(AgentError::NoLegalMoves)
}

/// Columns whose score equals the maximum exactly.
///
/// Scores are compared with `==`, never with a tolerance, so only true ties
/// are broken at random.
#[must_use]
#[expect(clippy::float_cmp)]
pub fn best_columns(scores: &[(usize, f64)]) -> LegalMoves {
    let best = scores
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(column, _)| column)
        .collect()
}

/// Plays a uniformly random open column.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_column(
        &self,
        board: &Board,
        _mark: Mark,
        _config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AgentError> {
        choose(&legal_moves(board)?, rng)
    }
}

/// How many rules a [`RuleBasedAgent`] applies, each tier including the ones below it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleTier {
    /// Take a winning column when one exists.
    Win,
    /// Otherwise, take a column where the opponent would win next.
    Block,
    /// Otherwise, avoid a column that lets the opponent win by playing on top of it.
    #[default]
    Avoid,
}

/// Hand-written rules with a random fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedAgent {
    tier: RuleTier,
}

impl RuleBasedAgent {
    #[must_use]
    pub fn new(tier: RuleTier) -> Self {
        Self { tier }
    }

    #[must_use]
    pub fn tier(&self) -> RuleTier {
        self.tier
    }
}

impl Agent for RuleBasedAgent {
    fn name(&self) -> &str {
        match self.tier {
            RuleTier::Win => "win",
            RuleTier::Block => "block",
            RuleTier::Avoid => "cautious",
        }
    }

    fn select_column(
        &self,
        board: &Board,
        mark: Mark,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AgentError> {
        let moves = legal_moves(board)?;
        let opponent = mark.opponent();

        let winning: LegalMoves = moves
            .iter()
            .copied()
            .filter(|&column| is_winning_move(board, column, mark, config))
            .collect();
        if !winning.is_empty() {
            tracing::debug!(?winning, "taking a winning column");
            return choose(&winning, rng);
        }

        if self.tier >= RuleTier::Block {
            let blocking: LegalMoves = moves
                .iter()
                .copied()
                .filter(|&column| is_winning_move(board, column, opponent, config))
                .collect();
            if !blocking.is_empty() {
                tracing::debug!(?blocking, "blocking the opponent");
                return choose(&blocking, rng);
            }
        }

        if self.tier >= RuleTier::Avoid {
            let safe: LegalMoves = moves
                .iter()
                .copied()
                .filter(|&column| !hands_opponent_win(board, column, mark, config))
                .collect();
            if !safe.is_empty() {
                return choose(&safe, rng);
            }
            tracing::debug!("every column hands the opponent a win");
        }

        choose(&moves, rng)
    }
}

/// Whether dropping `mark` into `column` lets the opponent win by playing on
/// top of it. Only that one square is checked, and a column our piece fills
/// is never unsafe.
fn hands_opponent_win(board: &Board, column: usize, mark: Mark, config: &GameConfig) -> bool {
    let next = board.dropped(column, mark);
    next.is_legal(column) && is_winning_move(&next, column, mark.opponent(), config)
}

/// Plays the column whose resulting board scores best under [`Heuristic::Simple`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyAgent;

impl GreedyAgent {
    /// One-step scores for every legal column.
    #[must_use]
    pub fn score_moves(board: &Board, mark: Mark, config: &GameConfig) -> Vec<(usize, f64)> {
        board
            .legal_moves()
            .into_iter()
            .map(|column| {
                let next = board.dropped(column, mark);
                (column, Heuristic::Simple.evaluate(&next, mark, config))
            })
            .collect()
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn select_column(
        &self,
        board: &Board,
        mark: Mark,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AgentError> {
        legal_moves(board)?;
        let scores = Self::score_moves(board, mark, config);
        tracing::trace!(?scores, "greedy scores");
        choose(&best_columns(&scores), rng)
    }
}

/// Plays the column with the best minimax score, breaking exact ties at random.
#[derive(Debug)]
pub struct MinimaxAgent {
    search: MinimaxConfig,
    evaluator: Box<dyn BoardEvaluator>,
}

impl MinimaxAgent {
    /// Searches with the [`Heuristic::MinimaxTuned`] leaf evaluator.
    #[must_use]
    pub fn new(search: MinimaxConfig) -> Self {
        Self::with_evaluator(search, Box::new(Heuristic::MinimaxTuned))
    }

    #[must_use]
    pub fn with_evaluator(search: MinimaxConfig, evaluator: Box<dyn BoardEvaluator>) -> Self {
        Self { search, evaluator }
    }

    #[must_use]
    pub fn search_config(&self) -> &MinimaxConfig {
        &self.search
    }

    /// Scores every legal column and returns the scores with the search counters.
    #[must_use]
    pub fn score_moves(
        &self,
        board: &Board,
        mark: Mark,
        config: &GameConfig,
    ) -> (Vec<(usize, f64)>, SearchStats) {
        let mut search = MinimaxSearch::new(config, self.search, self.evaluator.as_ref());
        let scores = search.score_moves(board, mark);
        (scores, search.stats())
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(MinimaxConfig::default())
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_column(
        &self,
        board: &Board,
        mark: Mark,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AgentError> {
        legal_moves(board)?;
        let (scores, stats) = self.score_moves(board, mark, config);
        let best = best_columns(&scores);
        let column = choose(&best, rng)?;
        tracing::debug!(
            %mark,
            column,
            ?best,
            nodes = stats.nodes,
            leaves = stats.leaves,
            deadline_hits = stats.deadline_hits,
            "minimax move"
        );
        Ok(column)
    }
}

/// Agent names accepted on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::FromStr)]
pub enum AgentKind {
    Random,
    Win,
    Block,
    Cautious,
    Greedy,
    #[default]
    Minimax,
}

impl AgentKind {
    pub const ALL: [Self; 6] = [
        AgentKind::Random,
        AgentKind::Win,
        AgentKind::Block,
        AgentKind::Cautious,
        AgentKind::Greedy,
        AgentKind::Minimax,
    ];

    /// Builds the agent; `search` only affects [`AgentKind::Minimax`].
    #[must_use]
    pub fn build(self, search: MinimaxConfig, heuristic: Heuristic) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent),
            AgentKind::Win => Box::new(RuleBasedAgent::new(RuleTier::Win)),
            AgentKind::Block => Box::new(RuleBasedAgent::new(RuleTier::Block)),
            AgentKind::Cautious => Box::new(RuleBasedAgent::new(RuleTier::Avoid)),
            AgentKind::Greedy => Box::new(GreedyAgent),
            AgentKind::Minimax => Box::new(MinimaxAgent::with_evaluator(search, Box::new(heuristic))),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgentKind::Random => "random",
            AgentKind::Win => "win",
            AgentKind::Block => "block",
            AgentKind::Cautious => "cautious",
            AgentKind::Greedy => "greedy",
            AgentKind::Minimax => "minimax",
        })
    }
}
