use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{event::TuiEvent, schedule::TickSchedule};

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    ///
    /// A non-positive rate falls back to `OnDirty`.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        if rate > 0.0 {
            Self::Throttled(Duration::from_secs_f64(1.0 / rate))
        } else {
            Self::OnDirty
        }
    }
}

/// Event loop state management.
///
/// Owns the tick schedule and the render timing and returns the next event
/// via `next()`.
#[derive(Debug)]
pub(super) struct EventLoop {
    ticks: TickSchedule,
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` without ticks, rendering on dirty state.
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            ticks: TickSchedule::new(),
            render_mode: RenderMode::default(),
            last_render: past_time,
            // initial render
            dirty: true,
        }
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.ticks.interval()
    }

    /// Cancels the pending tick and reschedules it when the interval changes.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.ticks.set_interval(interval, Instant::now());
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event that is due at `now`, if any.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if self.ticks.fire(now) {
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [self.ticks.deadline(), next_render_at]
            .into_iter()
            .flatten()
            .min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn quiet_loop(now: Instant) -> EventLoop {
        let mut events = EventLoop::new();
        assert!(events.due_event(now).is_some_and(|e| e.is_render()));
        events
    }

    #[test]
    fn test_initial_render() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        assert!(events.due_event(now).is_some_and(|e| e.is_render()));
        assert!(events.due_event(now).is_none());
        // without ticks and dirty state the loop only waits for input
        assert_eq!(events.compute_timeout(now), None);
    }

    #[test]
    fn test_tick_marks_dirty() {
        let start = Instant::now();
        let mut events = quiet_loop(start);
        events.ticks.set_interval(Some(100 * MS), start);

        assert_eq!(events.compute_timeout(start), Some(100 * MS));
        assert!(events.due_event(start + 100 * MS).is_some_and(|e| e.is_tick()));
        assert!(events.due_event(start + 100 * MS).is_some_and(|e| e.is_render()));
        assert!(events.due_event(start + 100 * MS).is_none());
    }

    #[test]
    fn test_cancelled_tick_never_fires() {
        let start = Instant::now();
        let mut events = quiet_loop(start);
        events.ticks.set_interval(Some(100 * MS), start);
        events.ticks.set_interval(None, start + 50 * MS);

        assert!(events.due_event(start + 500 * MS).is_none());
        assert_eq!(events.compute_timeout(start + 500 * MS), None);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let start = Instant::now();
        let mut events = quiet_loop(start);
        events.set_render_mode(RenderMode::Throttled(16 * MS));
        events.last_render = start;
        events.dirty = true;

        assert!(events.due_event(start + 10 * MS).is_none());
        assert_eq!(events.compute_timeout(start + 10 * MS), Some(6 * MS));
        assert!(events.due_event(start + 16 * MS).is_some_and(|e| e.is_render()));
    }

    #[test]
    fn test_throttled_from_rate() {
        assert_eq!(
            RenderMode::throttled_from_rate(4.0),
            RenderMode::Throttled(250 * MS)
        );
        assert_eq!(RenderMode::throttled_from_rate(0.0), RenderMode::OnDirty);
    }
}
