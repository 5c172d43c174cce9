use anyhow::Context as _;
use blockfall_engine::BoardSize;
use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

pub(crate) mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in (defaults to `play`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play seeded games with a random command policy and print the results as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Board dimensions shared by all modes.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Board width in cells
    #[clap(long, default_value_t = BoardSize::STANDARD.width())]
    width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = BoardSize::STANDARD.height())]
    height: usize,
}

impl Default for BoardArg {
    fn default() -> Self {
        Self {
            width: BoardSize::STANDARD.width(),
            height: BoardSize::STANDARD.height(),
        }
    }
}

impl BoardArg {
    pub(crate) fn size(&self) -> anyhow::Result<BoardSize> {
        BoardSize::new(self.width, self.height).context("invalid board size")
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_parse_play_options() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "play",
            "--width",
            "12",
            "--no-ghost",
            "--seed",
            "0123456789abcdef0123456789abcdef",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(arg.board.size().unwrap(), BoardSize::new(12, 20).unwrap());
        assert!(arg.no_ghost);
        assert!(arg.seed.is_some());
    }

    #[test]
    fn test_reject_bad_seed() {
        let result = CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_board_size_rejected() {
        let arg = BoardArg {
            width: 0,
            height: 20,
        };
        assert!(arg.size().is_err());
    }

    #[test]
    fn test_parse_simulate_options() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "simulate",
            "--games",
            "3",
            "--max-commands",
            "500",
        ])
        .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate mode");
        };
        assert_eq!(arg.games, 3);
        assert_eq!(arg.max_commands, 500);
        assert!(arg.output.is_none());
    }
}
