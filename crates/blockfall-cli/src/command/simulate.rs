use std::path::PathBuf;

use blockfall_engine::{BoardSize, Command, GameSession, PieceSeed, Snapshot};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{command::BoardArg, util::Output};

/// Commands the random policy picks from.
const POLICY_COMMANDS: [Command; 5] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::Rotate,
    Command::SoftDrop,
    Command::HardDrop,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// Master seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    pub(crate) games: usize,
    /// Command limit per game
    #[clap(long, default_value_t = 10_000)]
    pub(crate) max_commands: usize,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct GameResult {
    game: usize,
    seed: PieceSeed,
    commands: usize,
    final_score: Option<usize>,
    snapshot: Snapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        board,
        seed,
        games,
        max_commands,
        output,
    } = arg;

    let size = board.size()?;
    let master_seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Simulating {games} game(s) with master seed {master_seed}");

    let results = simulate_games(size, master_seed, *games, *max_commands);
    for result in &results {
        match result.final_score {
            Some(score) => eprintln!(
                "Game {}: score {score} after {} commands",
                result.game, result.commands
            ),
            None => eprintln!(
                "Game {}: stopped at command limit with score {}",
                result.game,
                result.snapshot.progress.score()
            ),
        }
    }

    Output::save_json(&results, output.clone())
}

fn simulate_games(
    size: BoardSize,
    master_seed: PieceSeed,
    games: usize,
    max_commands: usize,
) -> Vec<GameResult> {
    let mut rng = Pcg32::from_seed(master_seed.to_bytes());
    (1..=games)
        .map(|game| {
            let seed = rng.random();
            play_game(game, size, seed, max_commands, &mut rng)
        })
        .collect()
}

/// Plays one game: each step applies a random command, then advances gravity.
fn play_game<R>(
    game: usize,
    size: BoardSize,
    seed: PieceSeed,
    max_commands: usize,
    rng: &mut R,
) -> GameResult
where
    R: Rng,
{
    let mut session = GameSession::with_seed(size, seed).with_ghost(false);
    session.apply(Command::Start);

    let mut commands = 0;
    while commands < max_commands && session.final_score().is_none() {
        let command = POLICY_COMMANDS[rng.random_range(0..POLICY_COMMANDS.len())];
        session.apply(command);
        session.tick();
        commands += 1;
    }

    GameResult {
        game,
        seed,
        commands,
        final_score: session.final_score(),
        snapshot: session.snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "00112233445566778899aabbccddeeff";

    #[test]
    fn test_simulation_is_deterministic() {
        let seed = SEED.parse().unwrap();
        let a = simulate_games(BoardSize::STANDARD, seed, 3, 2_000);
        let b = simulate_games(BoardSize::STANDARD, seed, 3, 2_000);
        assert_eq!(a.len(), 3);
        for (a, b) in a.iter().zip(&b) {
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.commands, b.commands);
            assert_eq!(a.snapshot, b.snapshot);
        }
    }

    #[test]
    fn test_games_get_distinct_seeds() {
        let results = simulate_games(BoardSize::STANDARD, SEED.parse().unwrap(), 2, 10);
        assert_eq!(results[0].game, 1);
        assert_eq!(results[1].game, 2);
        assert_ne!(results[0].seed, results[1].seed);
    }

    #[test]
    fn test_command_limit() {
        let results = simulate_games(BoardSize::STANDARD, SEED.parse().unwrap(), 1, 3);
        let result = &results[0];
        assert!(result.commands <= 3);
        if result.final_score.is_none() {
            assert_eq!(result.commands, 3);
            assert!(!result.snapshot.state.is_game_over());
        }
    }

    #[test]
    fn test_small_board_ends_in_game_over() {
        let size = BoardSize::new(4, 4).unwrap();
        let results = simulate_games(size, SEED.parse().unwrap(), 1, 10_000);
        let result = &results[0];
        assert!(result.snapshot.state.is_game_over());
        assert_eq!(result.final_score, Some(result.snapshot.progress.score()));
        assert!(result.commands < 10_000);
    }

    #[test]
    fn test_result_serializes() {
        let results = simulate_games(BoardSize::STANDARD, SEED.parse().unwrap(), 1, 5);
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json[0]["game"], 1);
        assert_eq!(json[0]["seed"], results[0].seed.to_string());
        assert!(json[0]["snapshot"]["cells"].is_array());
    }
}
