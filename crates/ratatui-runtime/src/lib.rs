//! Minimal terminal application runtime on top of `ratatui` and `crossterm`.
//!
//! [`Runtime`] interleaves scheduled ticks, terminal input and redraws on a
//! single thread and dispatches them to an [`App`].

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime, schedule::TickSchedule};

mod app;
mod event;
mod event_loop;
mod runtime;
mod schedule;
