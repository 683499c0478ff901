use std::path::PathBuf;

use connectx_agent::{
    agent::AgentKind,
    harness::{self, Observation},
};
use connectx_engine::GameConfig;

use crate::{
    command::{GameArg, SearchArg, SeedArg},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ActArg {
    /// Observation JSON (`{"board": [...], "mark": 1}`); read from stdin when omitted
    #[arg(long)]
    observation: Option<PathBuf>,
    /// Configuration JSON (`{"rows": 6, "columns": 7, "inarow": 4}`); overrides the size flags
    #[arg(long)]
    configuration: Option<PathBuf>,
    #[arg(long, default_value = "minimax")]
    agent: AgentKind,
    #[clap(flatten)]
    game: GameArg,
    #[clap(flatten)]
    search: SearchArg,
    #[clap(flatten)]
    seed: SeedArg,
}

pub(crate) fn run(arg: &ActArg) -> anyhow::Result<()> {
    let ActArg {
        observation,
        configuration,
        agent,
        game,
        search,
        seed,
    } = arg;

    let config: GameConfig = match configuration {
        Some(path) => util::read_json_file("configuration", path)?,
        None => game.config()?,
    };
    let observation: Observation = util::read_json_input("observation", observation.as_deref())?;
    let agent = search.build(*agent);
    let mut rng = seed.seed().rng();

    let column = harness::act(&observation, &config, agent.as_ref(), &mut rng)?;
    println!("{column}");
    Ok(())
}
