use crossterm::event::Event;
use ratatui::Frame;

use crate::{Runtime, Tick};

/// A terminal application driven by [`Runtime::run`].
pub trait App {
    /// Called once the terminal is set up, before the first event.
    ///
    /// Configure the tick rate and render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the runtime should stop and restore the terminal.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances application state by one tick.
    fn update(&mut self, runtime: &mut Runtime, tick: Tick);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);
}
