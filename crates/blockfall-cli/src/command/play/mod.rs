use anyhow::Context as _;
use blockfall_engine::{GameSession, PieceSeed};
use ratatui_runtime::{RenderMode, Runtime};

use crate::command::{BoardArg, play::app::PlayApp};

pub(crate) mod app;

const DEFAULT_FRAME_RATE: f64 = 60.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Hide the landing preview of the falling piece
    #[clap(long)]
    pub(crate) no_ghost: bool,
    /// Maximum redraws per second
    #[clap(long, default_value_t = DEFAULT_FRAME_RATE)]
    pub(crate) frame_rate: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            board: BoardArg::default(),
            seed: None,
            no_ghost: false,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        board,
        seed,
        no_ghost,
        frame_rate,
    } = arg;

    let size = board.size()?;
    let session = match seed {
        Some(seed) => GameSession::with_seed(size, *seed),
        None => GameSession::new(size),
    }
    .with_ghost(!no_ghost);

    let mut app = PlayApp::new(session, RenderMode::throttled_from_rate(*frame_rate));
    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    let summary = app.summary();
    eprintln!("Games played: {}", summary.games_played);
    eprintln!("Best score: {}", summary.best_score);
    if let Some(entry) = summary.leader {
        eprintln!("Leader: {} ({})", entry.player_name, entry.score);
    }

    Ok(())
}
