use std::time::{Duration, Instant};

/// Cancellable periodic deadline.
///
/// Holds at most one pending tick. Changing the interval cancels the pending
/// deadline and schedules a new one a full interval after the change, so a
/// level-up, pause or resume never fires a stale tick. Missed deadlines are
/// not replayed: firing schedules the next deadline relative to the time it
/// was observed.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use ratatui_runtime::TickSchedule;
///
/// let start = Instant::now();
/// let mut schedule = TickSchedule::new();
/// schedule.set_interval(Some(Duration::from_millis(100)), start);
///
/// assert!(!schedule.fire(start + Duration::from_millis(99)));
/// assert!(schedule.fire(start + Duration::from_millis(100)));
/// assert_eq!(schedule.deadline(), Some(start + Duration::from_millis(200)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSchedule {
    interval: Option<Duration>,
    deadline: Option<Instant>,
}

impl TickSchedule {
    /// Creates a schedule with no pending tick.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: None,
            deadline: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Time of the pending tick, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Replaces the interval.
    ///
    /// Setting the current interval again keeps the pending deadline.
    /// Otherwise the pending tick is cancelled and, unless `interval` is
    /// `None`, a new one is scheduled at `now + interval`. Returns whether the
    /// schedule changed.
    pub fn set_interval(&mut self, interval: Option<Duration>, now: Instant) -> bool {
        if interval == self.interval {
            return false;
        }
        self.interval = interval;
        self.deadline = interval.map(|interval| now + interval);
        true
    }

    /// Checks whether the pending tick is due at `now`.
    ///
    /// When it is, the next deadline is scheduled one interval after `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match (self.interval, self.deadline) {
            (Some(interval), Some(deadline)) if deadline <= now => {
                self.deadline = Some(now + interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_no_interval_never_fires() {
        let now = Instant::now();
        let mut schedule = TickSchedule::new();
        assert!(!schedule.fire(now + 1000 * MS));
        assert_eq!(schedule.deadline(), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new();
        assert!(schedule.set_interval(Some(100 * MS), start));

        assert!(!schedule.fire(start + 50 * MS));
        assert!(schedule.fire(start + 100 * MS));
        assert!(!schedule.fire(start + 150 * MS));
        assert!(schedule.fire(start + 200 * MS));
    }

    #[test]
    fn test_missed_deadlines_are_not_replayed() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.set_interval(Some(100 * MS), start);

        assert!(schedule.fire(start + 450 * MS));
        assert!(!schedule.fire(start + 450 * MS));
        assert_eq!(schedule.deadline(), Some(start + 550 * MS));
    }

    #[test]
    fn test_interval_change_reschedules_from_now() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.set_interval(Some(1200 * MS), start);

        // level up shortly before the pending tick
        assert!(schedule.set_interval(Some(700 * MS), start + 1100 * MS));
        assert_eq!(schedule.deadline(), Some(start + 1800 * MS));
        assert!(!schedule.fire(start + 1200 * MS));
        assert!(schedule.fire(start + 1800 * MS));
    }

    #[test]
    fn test_same_interval_keeps_deadline() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.set_interval(Some(100 * MS), start);
        assert!(!schedule.set_interval(Some(100 * MS), start + 90 * MS));
        assert_eq!(schedule.deadline(), Some(start + 100 * MS));
    }

    #[test]
    fn test_pause_and_resume() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new();
        schedule.set_interval(Some(100 * MS), start);

        assert!(schedule.set_interval(None, start + 90 * MS));
        assert_eq!(schedule.deadline(), None);
        assert!(!schedule.fire(start + 500 * MS));

        assert!(schedule.set_interval(Some(100 * MS), start + 500 * MS));
        assert!(!schedule.fire(start + 590 * MS));
        assert!(schedule.fire(start + 600 * MS));
    }
}
