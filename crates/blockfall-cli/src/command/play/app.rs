use std::time::Duration;

use blockfall_engine::{Command, GameSession, SessionState, Snapshot};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, RenderMode, Runtime};

use crate::{
    leaderboard::{Leaderboard, ScoreEntry, SubmitError},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

/// Player name entry shown on the game-over panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameEntry {
    Editing {
        name: String,
        error: Option<SubmitError>,
    },
    Submitted {
        rank: Option<usize>,
    },
    Skipped,
}

impl NameEntry {
    fn new() -> Self {
        Self::Editing {
            name: String::new(),
            error: None,
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Summary {
    pub(crate) games_played: usize,
    pub(crate) best_score: usize,
    pub(crate) leader: Option<ScoreEntry>,
}

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    snapshot: Snapshot,
    leaderboard: Leaderboard,
    leaderboard_view: Vec<ScoreEntry>,
    seen_revision: u64,
    name_entry: NameEntry,
    best_score: usize,
    render_mode: RenderMode,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(session: GameSession, render_mode: RenderMode) -> Self {
        let snapshot = session.snapshot();
        let seen_revision = snapshot.leaderboard_revision;
        Self {
            session,
            snapshot,
            leaderboard: Leaderboard::new(),
            leaderboard_view: vec![],
            seen_revision,
            name_entry: NameEntry::new(),
            best_score: 0,
            render_mode,
            is_exiting: false,
        }
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary {
            games_played: self.session.games_started(),
            best_score: self.best_score,
            leader: self.leaderboard.entries().first().cloned(),
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.session.state().is_game_over() && self.name_entry.is_editing() {
            self.edit_name(code);
            return;
        }
        match code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            code => {
                if let Some(command) = command_for_key(self.session.state(), code) {
                    self.apply(command);
                }
            }
        }
    }

    fn edit_name(&mut self, code: KeyCode) {
        let NameEntry::Editing { name, error } = &mut self.name_entry else {
            return;
        };
        match code {
            KeyCode::Char(c) if !c.is_control() => {
                name.push(c);
                *error = None;
            }
            KeyCode::Backspace => {
                name.pop();
                *error = None;
            }
            KeyCode::Enter => self.submit_score(),
            KeyCode::Esc => self.name_entry = NameEntry::Skipped,
            _ => {}
        }
    }

    fn submit_score(&mut self) {
        let Some(score) = self.session.final_score() else {
            return;
        };
        let NameEntry::Editing { name, error } = &mut self.name_entry else {
            return;
        };
        match self
            .leaderboard
            .submit(self.session.games_started(), name, score)
        {
            Ok(rank) => {
                self.name_entry = NameEntry::Submitted { rank };
                self.session.notify_score_submitted();
                self.refresh();
            }
            Err(err) => *error = Some(err),
        }
    }

    fn apply(&mut self, command: Command) {
        if command == Command::Start {
            self.name_entry = NameEntry::new();
        }
        self.session.apply(command);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.snapshot = self.session.snapshot();
        if let Some(score) = self.snapshot.final_score {
            self.best_score = self.best_score.max(score);
        }
        if self.snapshot.leaderboard_revision != self.seen_revision {
            self.seen_revision = self.snapshot.leaderboard_revision;
            self.leaderboard_view = self.leaderboard.entries().to_vec();
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.snapshot.state {
            SessionState::Idle => IDLE_BINDINGS,
            SessionState::Spawning | SessionState::Falling => FALLING_BINDINGS,
            SessionState::Paused => PAUSED_BINDINGS,
            SessionState::GameOver if self.name_entry.is_editing() => NAME_ENTRY_BINDINGS,
            SessionState::GameOver => GAME_OVER_BINDINGS,
        }
    }
}

const IDLE_BINDINGS: &[KeyBinding<'static>] =
    &[(&["Enter", "Space"], "Start"), (&["Q", "Esc"], "Quit")];
const FALLING_BINDINGS: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q", "Esc"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding<'static>] = &[(&["P"], "Resume"), (&["Q", "Esc"], "Quit")];
const NAME_ENTRY_BINDINGS: &[KeyBinding<'static>] =
    &[(&["Enter"], "Submit Score"), (&["Esc"], "Skip")];
const GAME_OVER_BINDINGS: &[KeyBinding<'static>] =
    &[(&["Enter"], "Play Again"), (&["Q", "Esc"], "Quit")];

/// Maps a key to an engine command for the given state.
fn command_for_key(state: SessionState, code: KeyCode) -> Option<Command> {
    let command = match (state, code) {
        (SessionState::Idle | SessionState::GameOver, KeyCode::Enter | KeyCode::Char(' ')) => {
            Command::Start
        }
        (SessionState::Falling, KeyCode::Left) => Command::MoveLeft,
        (SessionState::Falling, KeyCode::Right) => Command::MoveRight,
        (SessionState::Falling, KeyCode::Down) => Command::SoftDrop,
        (SessionState::Falling, KeyCode::Up) => Command::Rotate,
        (SessionState::Falling, KeyCode::Char(' ')) => Command::HardDrop,
        (SessionState::Falling | SessionState::Paused, KeyCode::Char('p' | 'P')) => {
            Command::TogglePause
        }
        _ => return None,
    };
    Some(command)
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(self.render_mode);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn tick_interval(&self) -> Option<Duration> {
        self.session.tick_interval()
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code);
        }
    }

    fn on_tick(&mut self) {
        self.session.tick();
        self.refresh();
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display =
            SessionDisplay::new(&self.snapshot, &self.leaderboard_view, &self.name_entry);
        let help = KeyBindingDisplay::new(self.key_bindings());

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }
}
