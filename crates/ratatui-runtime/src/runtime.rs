use std::{io, time::Duration};

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently scheduled tick interval.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    /// Sets the render mode.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Applies the application's desired tick interval.
    ///
    /// A changed interval cancels the pending tick and schedules a fresh one.
    pub fn sync_tick_interval<A>(&mut self, app: &A)
    where
        A: App + ?Sized,
    {
        self.events.set_tick_interval(app.tick_interval());
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Tick`: calls `app.on_tick()`
    ///    - `Render`: calls `app.draw()`
    ///    - terminal events: calls `app.handle_event()`
    ///
    ///    After each tick or terminal event the tick schedule is synced with
    ///    `app.tick_interval()`.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);
        self.sync_tick_interval(app);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => {
                        app.on_tick();
                        self.sync_tick_interval(app);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&event);
                        self.sync_tick_interval(app);
                    }
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event;
    use ratatui::Frame;

    use super::*;

    #[derive(Debug, Default)]
    struct Stepper {
        interval: Option<Duration>,
    }

    impl App for Stepper {
        fn init(&mut self, _runtime: &mut Runtime) {}

        fn should_exit(&self) -> bool {
            true
        }

        fn tick_interval(&self) -> Option<Duration> {
            self.interval
        }

        fn handle_event(&mut self, _event: &Event) {}

        fn on_tick(&mut self) {}

        fn draw(&self, _frame: &mut Frame) {}
    }

    #[test]
    fn test_sync_tick_interval_follows_app() {
        let mut runtime = Runtime::new();
        let mut app = Stepper::default();
        runtime.sync_tick_interval(&app);
        assert_eq!(runtime.tick_interval(), None);

        app.interval = Some(Duration::from_millis(700));
        runtime.sync_tick_interval(&app);
        assert_eq!(runtime.tick_interval(), Some(Duration::from_millis(700)));

        app.interval = None;
        runtime.sync_tick_interval(&app);
        assert_eq!(runtime.tick_interval(), None);
    }
}
