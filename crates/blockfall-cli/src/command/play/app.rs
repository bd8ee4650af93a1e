use blockfall_engine::{BagSeed, GameFlow, Rules, SessionResult};
use crossterm::event::Event;
use ratatui::Frame;
use ratatui_runtime::{App, RenderMode, Runtime, Tick};

use crate::{input::KeyCapture, ui};

#[derive(Debug)]
pub struct PlayApp {
    flow: GameFlow,
    keys: KeyCapture,
    fps: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(rules: Rules, seed: Option<BagSeed>, fps: f64) -> Self {
        Self {
            flow: GameFlow::new(rules, seed),
            keys: KeyCapture::new(false),
            fps,
            is_exiting: false,
        }
    }

    pub fn into_results(self) -> Vec<SessionResult> {
        self.flow.results().to_vec()
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.fps));
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.fps));
        self.keys = KeyCapture::new(runtime.reports_key_release());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event() {
            self.keys.handle_key(&key);
        }
    }

    fn update(&mut self, _runtime: &mut Runtime, tick: Tick) {
        let (held, pressed) = self.keys.take_frame();
        if self
            .flow
            .step(&held, &pressed, tick.elapsed_secs())
            .is_exit()
        {
            self.is_exiting = true;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        ui::draw(frame, &self.flow, self.keys.reports_release());
    }
}
