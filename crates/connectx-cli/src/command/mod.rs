use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use connectx_agent::{
    agent::{Agent, AgentKind},
    heuristic::Heuristic,
    search::{DEFAULT_DEPTH, MinimaxConfig, Pruning},
};
use connectx_engine::{GameConfig, GameSeed};

use crate::{
    schema::report::{AgentInfo, SearchInfo},
    util,
};

use self::{act::ActArg, evaluate::EvaluateArg, play::PlayArg};

mod act;
mod evaluate;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Choose a column for an observation sent by a game runner
    Act(#[clap(flatten)] ActArg),
    /// Play many games between two agents and report win rates
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Play one game between two agents and print every board
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(&args.log_level);
    match args.mode {
        Mode::Act(arg) => act::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

/// Board size flags.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    #[arg(long, default_value_t = 6)]
    rows: usize,
    #[arg(long, default_value_t = 7)]
    columns: usize,
    /// Pieces in a row needed to win
    #[arg(long, default_value_t = 4)]
    inarow: usize,
}

impl GameArg {
    pub(crate) fn config(&self) -> anyhow::Result<GameConfig> {
        GameConfig::new(self.rows, self.columns, self.inarow).context("Invalid board configuration")
    }
}

/// Settings of the minimax agent.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Plies searched, including the candidate move
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
    /// Leaf evaluator: `simple` or `minimax-tuned`
    #[arg(long, default_value = "minimax-tuned")]
    heuristic: Heuristic,
    /// Prune with alpha-beta (same scores, fewer nodes)
    #[arg(long)]
    alpha_beta: bool,
    /// Per-move time budget in milliseconds; nodes reached after it are scored statically
    #[arg(long)]
    deadline_ms: Option<u64>,
}

impl SearchArg {
    pub(crate) fn config(&self) -> MinimaxConfig {
        MinimaxConfig {
            depth: self.depth,
            pruning: if self.alpha_beta {
                Pruning::AlphaBeta
            } else {
                Pruning::None
            },
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }

    pub(crate) fn build(&self, kind: AgentKind) -> Box<dyn Agent> {
        kind.build(self.config(), self.heuristic)
    }

    pub(crate) fn info(&self, kind: AgentKind) -> AgentInfo {
        let search = (kind == AgentKind::Minimax).then(|| SearchInfo {
            depth: self.depth,
            heuristic: self.heuristic.to_string(),
            alpha_beta: self.alpha_beta,
            deadline_ms: self.deadline_ms,
        });
        AgentInfo {
            kind: kind.to_string(),
            search,
        }
    }
}

/// Random source flags.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SeedArg {
    /// Seed as up to 32 hex digits; random when omitted
    #[arg(long)]
    seed: Option<GameSeed>,
}

impl SeedArg {
    pub(crate) fn seed(&self) -> GameSeed {
        let seed = self.seed.unwrap_or_else(rand::random);
        tracing::info!(seed = %seed.to_hex(), "random seed");
        seed
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[derive(Debug, Parser)]
    struct SearchOnly {
        #[clap(flatten)]
        search: SearchArg,
    }

    #[test]
    fn test_search_flags() {
        let args = SearchOnly::try_parse_from([
            "connectx",
            "--alpha-beta",
            "--depth",
            "2",
            "--deadline-ms",
            "50",
        ])
        .unwrap();
        let config = args.search.config();
        assert_eq!(config.depth, 2);
        assert_eq!(config.pruning, Pruning::AlphaBeta);
        assert_eq!(config.deadline, Some(Duration::from_millis(50)));

        let defaults = SearchOnly::try_parse_from(["connectx"]).unwrap();
        assert_eq!(defaults.search.config(), MinimaxConfig::default());
    }

    #[test]
    fn test_deadline_help_describes_static_scoring() {
        let command = SearchOnly::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "deadline_ms")
            .and_then(|arg| arg.get_help())
            .unwrap()
            .to_string();
        assert!(help.contains("scored statically"), "{help}");
        assert!(!help.contains("deepen"), "{help}");
    }
}
