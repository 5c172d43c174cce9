mod command;
mod leaderboard;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
