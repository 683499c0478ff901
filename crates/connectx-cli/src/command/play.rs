use anyhow::Context;
use connectx_agent::{
    agent::AgentKind,
    arena::{Arena, GameResult},
};
use connectx_engine::{Board, Mark};

use crate::command::{GameArg, SearchArg, SeedArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Agent playing X, which moves first
    #[arg(long, default_value = "minimax")]
    agent1: AgentKind,
    /// Agent playing O
    #[arg(long, default_value = "cautious")]
    agent2: AgentKind,
    #[clap(flatten)]
    game: GameArg,
    #[clap(flatten)]
    search: SearchArg,
    #[clap(flatten)]
    seed: SeedArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        agent1,
        agent2,
        game,
        search,
        seed,
    } = arg;

    let config = game.config()?;
    let mut rng = seed.seed().rng();
    let arena = Arena::new(config);
    let record = arena.play_game(
        search.build(*agent1).as_ref(),
        search.build(*agent2).as_ref(),
        &mut rng,
    );

    let mut board = Board::new(&config);
    let mut mark = Mark::One;
    for (turn, &column) in record.moves.iter().enumerate() {
        board = board
            .try_dropped(column, mark)
            .with_context(|| format!("Failed to replay move #{turn}"))?;
        let agent = if mark == Mark::One { agent1 } else { agent2 };
        println!("Move #{turn}: player {mark} ({agent}) plays column {column}");
        println!("{board}");
        println!();
        mark = mark.opponent();
    }

    match record.result {
        GameResult::Win(Mark::One) => println!("Player 1 ({agent1}) wins"),
        GameResult::Win(Mark::Two) => println!("Player 2 ({agent2}) wins"),
        GameResult::Draw => println!("Draw"),
        GameResult::Forfeit(mark) => println!("Player {mark} forfeits with an invalid move"),
    }
    Ok(())
}
