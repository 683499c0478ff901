use std::path::PathBuf;

use chrono::Utc;
use connectx_agent::{agent::AgentKind, arena::Arena};

use crate::{
    command::{GameArg, SearchArg, SeedArg},
    schema::report::EvaluationRecord,
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    #[arg(long, default_value = "minimax")]
    agent1: AgentKind,
    #[arg(long, default_value = "random")]
    agent2: AgentKind,
    /// Number of games; agent 1 moves first in half of them (rounded down)
    #[arg(long, default_value_t = 100)]
    rounds: usize,
    /// Save the report as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    game: GameArg,
    #[clap(flatten)]
    search: SearchArg,
    #[clap(flatten)]
    seed: SeedArg,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        agent1,
        agent2,
        rounds,
        output,
        game,
        search,
        seed,
    } = arg;

    let config = game.config()?;
    let seed = seed.seed();
    let mut rng = seed.rng();
    let arena = Arena::new(config);

    eprintln!("Playing {rounds} games: {agent1} vs {agent2}...");
    let report = arena.evaluate(
        search.build(*agent1).as_ref(),
        search.build(*agent2).as_ref(),
        *rounds,
        &mut rng,
    );

    println!("Agent 1 Win Percentage: {:.2}", report.agent1_win_rate());
    println!("Agent 2 Win Percentage: {:.2}", report.agent2_win_rate());
    println!("Number of draws: {:.2}", report.draw_rate());
    println!("Number of Invalid Plays by Agent 1: {}", report.agent1_invalid);
    println!("Number of Invalid Plays by Agent 2: {}", report.agent2_invalid);

    if output.is_some() {
        let record = EvaluationRecord {
            evaluated_at: Utc::now(),
            seed,
            config,
            agent1: search.info(*agent1),
            agent2: search.info(*agent2),
            report,
        };
        let mut output = Output::from_output_path(output.clone())?;
        eprintln!("Saving report to {}...", output.display_path());
        output.write_json(&record)?;
    }
    Ok(())
}
