use std::{
    io::{self, Write as _},
    time::Duration,
};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use ratatui::DefaultTerminal;

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Runs an [`App`] in the terminal.
///
/// On terminals that support the kitty keyboard protocol the runtime asks for
/// key release events, so applications can track which keys are held. Check
/// [`Self::reports_key_release`] to know whether they will arrive.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    reports_key_release: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
            reports_key_release: false,
        }
    }

    /// Sets the tick rate (Hz). `None` disables ticks.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Whether the terminal sends key release events.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.reports_key_release
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// The terminal is restored before returning, on success and on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.reports_key_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
            if self.reports_key_release {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            app.init(&mut self);
            let result = self.run_loop(terminal, app);

            if self.reports_key_release {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
                io::stdout().flush()?;
            }
            result
        })
    }

    fn run_loop<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick(tick) => app.update(self, tick),
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(self, event),
            }
        }
        Ok(())
    }
}
