use blockfall_engine::{InputAction, InputState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps a key to the control it drives.
#[must_use]
pub fn action_for(key: &KeyEvent) -> Option<InputAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(InputAction::Quit);
    }
    let action = match key.code {
        KeyCode::Left => InputAction::MoveLeft,
        KeyCode::Right => InputAction::MoveRight,
        KeyCode::Down => InputAction::SoftDrop,
        KeyCode::Up => InputAction::RotateCw,
        KeyCode::Char(' ') => InputAction::HardDrop,
        KeyCode::Enter => InputAction::Confirm,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'z' => InputAction::RotateCcw,
            'x' => InputAction::Rotate180,
            'c' => InputAction::Hold,
            'q' => InputAction::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Collects key events between ticks into per-frame input snapshots.
///
/// Terminal key auto-repeat never counts as a new press. When the terminal
/// reports key releases, a key stays held from its press to its release.
/// Otherwise keys are only held for the frame they were pressed in, and the
/// terminal's own repeat shows up as repeated presses.
#[derive(Debug, Clone)]
pub struct KeyCapture {
    reports_release: bool,
    held: InputState,
    pressed: InputState,
}

impl KeyCapture {
    #[must_use]
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: InputState::NONE,
            pressed: InputState::NONE,
        }
    }

    /// Whether key releases arrive, so held keys last until released.
    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        let Some(action) = action_for(key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                if !(self.reports_release && self.held.get(action)) {
                    self.pressed.set(action, true);
                }
                self.held.set(action, true);
            }
            KeyEventKind::Release => self.held.set(action, false),
            KeyEventKind::Repeat => {}
        }
    }

    /// Returns `(held, pressed)` for the frame and starts collecting the next one.
    ///
    /// A key pressed and released within one frame is still reported as held.
    pub fn take_frame(&mut self) -> (InputState, InputState) {
        let mut held = self.held;
        for action in InputAction::ALL {
            if self.pressed.get(action) {
                held.set(action, true);
            }
        }
        let pressed = std::mem::take(&mut self.pressed);
        if !self.reports_release {
            self.held = InputState::NONE;
        }
        (held, pressed)
    }
}
