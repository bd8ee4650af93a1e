use blockfall_engine::{GameFlow, GameState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};

use self::widgets::{KeyBinding, KeyBindingDisplay, MenuDisplay, SessionDisplay, style};

pub mod widgets;

const PLAY_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["↑", "Z", "X"], "Rotate CW/CCW/180"),
    (&["Esc"], "Menu"),
];
const MENU_KEYS: &[KeyBinding] = &[(&["Enter"], "Start"), (&["Esc", "Q"], "Quit")];
const ENDED_KEYS: &[KeyBinding] = &[(&["Enter"], "Menu"), (&["Esc", "Q"], "Quit")];

const NO_RELEASE_HINT: &str =
    "This terminal does not report key releases: held keys repeat at the terminal's rate";

/// Draws whatever the flow is currently showing, with a help line underneath.
///
/// Without key release events a held key cannot be told apart from repeated
/// presses, so the play screen says so under the help line.
pub fn draw(frame: &mut Frame<'_>, flow: &GameFlow, reports_key_release: bool) {
    let [main_area, help_area, hint_area] = Layout::vertical([
        Constraint::Length(22),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas::<3>(frame.area());

    let keys = match flow.state() {
        GameState::Menu => {
            frame.render_widget(MenuDisplay::new(flow.results()), main_area);
            MENU_KEYS
        }
        GameState::Playing(session) => {
            frame.render_widget(SessionDisplay::new(session), main_area);
            if !reports_key_release {
                frame.render_widget(
                    Line::styled(NO_RELEASE_HINT, style::HINT).centered(),
                    hint_area,
                );
            }
            PLAY_KEYS
        }
        GameState::Ended { session, reason } => {
            frame.render_widget(SessionDisplay::new(session).ended(*reason), main_area);
            ENDED_KEYS
        }
    };
    frame.render_widget(KeyBindingDisplay::new(keys), help_area);
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{BagSeed, InputAction, InputState, Rules};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn screen_text(flow: &GameFlow, reports_key_release: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|frame| draw(frame, flow, reports_key_release))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn playing_flow() -> GameFlow {
        let mut flow = GameFlow::new(Rules::default(), Some(BagSeed::from_u64(2)));
        let confirm = InputState::only(InputAction::Confirm);
        flow.step(&confirm, &confirm, 0.0);
        assert!(flow.state().is_playing());
        flow
    }

    #[test]
    fn test_hint_shown_while_playing_without_key_release() {
        let flow = playing_flow();
        assert!(screen_text(&flow, false).contains("does not report key releases"));
        assert!(!screen_text(&flow, true).contains("does not report key releases"));
    }

    #[test]
    fn test_hint_not_shown_in_menu() {
        let flow = GameFlow::new(Rules::default(), None);
        let text = screen_text(&flow, false);
        assert!(!text.contains("does not report key releases"));
        assert!(text.contains("Start"));
    }
}
