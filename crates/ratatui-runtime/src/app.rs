use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for TUI applications driven by [`Runtime::run`].
///
/// The runtime owns the tick schedule. After every dispatched event it asks
/// the application for its desired interval with [`App::tick_interval`] and
/// reschedules the pending tick when the answer changes.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the render mode.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Interval between ticks, or `None` to stop ticking.
    fn tick_interval(&self) -> Option<Duration>;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    /// Advances application state (called on each tick).
    fn on_tick(&mut self);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);
}
