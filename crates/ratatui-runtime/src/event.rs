use crossterm::event::Event as CrosstermEvent;

/// Events dispatched by [`Runtime::run`](crate::Runtime::run).
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A scheduled tick is due.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// Key input, mouse, resize, and other terminal events.
    Crossterm(CrosstermEvent),
}
