//! A small frame-paced event loop for ratatui applications.
//!
//! [`Runtime::run`] owns the terminal for the duration of the application and
//! drives an [`App`] with three kinds of events: fixed-rate [`Tick`]s carrying
//! the time since start, throttled renders, and raw crossterm events.

pub use self::{
    app::App,
    event_loop::{RenderMode, Tick},
    runtime::Runtime,
};

mod app;
mod event;
mod event_loop;
mod runtime;
