//! Head-to-head evaluation of two agents.
//!
//! [`Arena::evaluate`] plays `rounds` games: agent 1 moves first in the first
//! half (rounded down), agent 2 in the rest. An agent that fails to return a
//! playable column loses the game by forfeit, which is reported separately
//! from ordinary wins.

use connectx_engine::{GameConfig, GameSession, Mark, Outcome};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;

/// How one game ended, from the seats' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
pub enum GameResult {
    Win(Mark),
    Draw,
    /// The given mark returned an error or an unplayable column.
    Forfeit(Mark),
}

/// A finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub result: GameResult,
    /// Columns played, first mover first.
    pub moves: Vec<usize>,
}

/// Totals of an [`Arena::evaluate`] run, from agent 1's and agent 2's points of view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub rounds: usize,
    pub agent1_wins: usize,
    pub agent2_wins: usize,
    pub draws: usize,
    pub agent1_invalid: usize,
    pub agent2_invalid: usize,
}

impl MatchReport {
    fn record(&mut self, result: GameResult, agent1_mark: Mark) {
        self.rounds += 1;
        match result {
            GameResult::Win(mark) if mark == agent1_mark => self.agent1_wins += 1,
            GameResult::Win(_) => self.agent2_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Forfeit(mark) if mark == agent1_mark => self.agent1_invalid += 1,
            GameResult::Forfeit(_) => self.agent2_invalid += 1,
        }
    }

    /// Share of rounds won by agent 1, in `0.0..=1.0`.
    #[must_use]
    pub fn agent1_win_rate(&self) -> f64 {
        self.rate(self.agent1_wins)
    }

    #[must_use]
    pub fn agent2_win_rate(&self) -> f64 {
        self.rate(self.agent2_wins)
    }

    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    #[expect(clippy::cast_precision_loss)]
    fn rate(&self, count: usize) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        count as f64 / self.rounds as f64
    }
}

/// Plays agents against each other on one board size.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    config: GameConfig,
}

impl Arena {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Plays one game; `first` holds [`Mark::One`] and moves first.
    pub fn play_game(
        &self,
        first: &dyn Agent,
        second: &dyn Agent,
        rng: &mut dyn RngCore,
    ) -> GameRecord {
        let mut session = GameSession::new(self.config);
        loop {
            let mark = session.to_move();
            let agent = match mark {
                Mark::One => first,
                Mark::Two => second,
            };
            let played = agent
                .select_column(session.board(), mark, &self.config, rng)
                .map_err(|e| e.to_string())
                .and_then(|column| session.play(column).map_err(|e| e.to_string()));
            match played {
                Ok(Some(outcome)) => {
                    let result = match outcome {
                        Outcome::Winner(mark) => GameResult::Win(mark),
                        Outcome::Draw => GameResult::Draw,
                    };
                    return GameRecord {
                        result,
                        moves: session.history().to_vec(),
                    };
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(agent = agent.name(), %mark, %error, "invalid play");
                    return GameRecord {
                        result: GameResult::Forfeit(mark),
                        moves: session.history().to_vec(),
                    };
                }
            }
        }
    }

    /// Plays `rounds` games between `agent1` and `agent2`, alternating the first move.
    pub fn evaluate(
        &self,
        agent1: &dyn Agent,
        agent2: &dyn Agent,
        rounds: usize,
        rng: &mut dyn RngCore,
    ) -> MatchReport {
        let mut report = MatchReport::default();
        let agent1_first = rounds / 2;
        for round in 0..rounds {
            let record = if round < agent1_first {
                let record = self.play_game(agent1, agent2, rng);
                report.record(record.result, Mark::One);
                record
            } else {
                let record = self.play_game(agent2, agent1, rng);
                report.record(record.result, Mark::Two);
                record
            };
            tracing::debug!(round, result = ?record.result, moves = record.moves.len(), "game finished");
        }
        tracing::info!(
            agent1 = agent1.name(),
            agent2 = agent2.name(),
            rounds,
            agent1_wins = report.agent1_wins,
            agent2_wins = report.agent2_wins,
            draws = report.draws,
            "evaluation finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use connectx_engine::{Board, GameSeed};

    use super::*;
    use crate::{
        AgentError,
        agent::{MinimaxAgent, RandomAgent, RuleBasedAgent, RuleTier},
    };

    /// Always plays column 0, even when it is full.
    #[derive(Debug)]
    struct Stubborn;

    impl Agent for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn select_column(
            &self,
            _board: &Board,
            _mark: Mark,
            _config: &GameConfig,
            _rng: &mut dyn RngCore,
        ) -> Result<usize, AgentError> {
            Ok(0)
        }
    }

    #[test]
    fn test_play_game_ends_in_a_result() {
        let arena = Arena::new(GameConfig::CONNECT_FOUR);
        let mut rng = GameSeed::from_u128(11).rng();
        let record = arena.play_game(&RandomAgent, &RandomAgent, &mut rng);
        assert!(!record.moves.is_empty());
        assert!(record.moves.len() <= 42);
        assert!(!record.result.is_forfeit());
    }

    #[test]
    fn test_invalid_column_is_a_forfeit() {
        let arena = Arena::new(GameConfig::CONNECT_FOUR);
        let mut rng = GameSeed::from_u128(0).rng();
        // Both play column 0: after six pieces it is full and X must play it again.
        let record = arena.play_game(&Stubborn, &Stubborn, &mut rng);
        assert_eq!(record.result, GameResult::Forfeit(Mark::One));
        assert_eq!(record.moves, vec![0; 6]);
    }

    #[test]
    fn test_evaluate_alternates_first_player() {
        let arena = Arena::new(GameConfig::CONNECT_FOUR);
        let mut rng = GameSeed::from_u128(0).rng();
        // Whoever moves first forfeits on the seventh move.
        let report = arena.evaluate(&Stubborn, &Stubborn, 5, &mut rng);
        assert_eq!(report.rounds, 5);
        assert_eq!(report.agent1_invalid, 2);
        assert_eq!(report.agent2_invalid, 3);
        assert_eq!(report.agent1_win_rate(), 0.0);
    }

    #[test]
    fn test_minimax_beats_random() {
        let arena = Arena::new(GameConfig::CONNECT_FOUR);
        let mut rng = GameSeed::from_u128(2024).rng();
        let report = arena.evaluate(&MinimaxAgent::default(), &RandomAgent, 10, &mut rng);
        assert_eq!(report.agent1_invalid + report.agent2_invalid, 0);
        assert!(report.agent1_wins >= 7, "{report:?}");
    }

    #[test]
    fn test_rule_based_beats_random() {
        let arena = Arena::new(GameConfig::CONNECT_FOUR);
        let mut rng = GameSeed::from_u128(7).rng();
        let cautious = RuleBasedAgent::new(RuleTier::Avoid);
        let report = arena.evaluate(&cautious, &RandomAgent, 20, &mut rng);
        assert!(report.agent1_wins > report.agent2_wins, "{report:?}");
    }

    #[test]
    fn test_rates() {
        let report = MatchReport {
            rounds: 4,
            agent1_wins: 2,
            agent2_wins: 1,
            draws: 1,
            ..MatchReport::default()
        };
        assert_eq!(report.agent1_win_rate(), 0.5);
        assert_eq!(report.agent2_win_rate(), 0.25);
        assert_eq!(report.draw_rate(), 0.25);
        assert_eq!(MatchReport::default().draw_rate(), 0.0);
    }
}
