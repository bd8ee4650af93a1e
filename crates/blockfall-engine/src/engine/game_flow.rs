use rand::Rng as _;

use crate::BagSeed;

use super::{Advance, GameSession, GameStats, InputState, Rules, Termination};

/// Screen-level state of the game.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum GameState {
    /// Waiting for the player to start a game.
    Menu,
    /// A session is running.
    Playing(Box<GameSession>),
    /// A session topped out; its final state stays on screen.
    Ended {
        session: Box<GameSession>,
        reason: Termination,
    },
}

/// Whether the front-end should keep running after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum FlowControl {
    Continue,
    Exit,
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub seed: BagSeed,
    pub reason: Termination,
    pub stats: GameStats,
    /// Session time in seconds.
    pub elapsed: f64,
}

enum Transition {
    Stay,
    Start,
    End(Termination),
    Enter(GameState),
    Exit,
}

/// Drives the menu, playing and ended states from frame input.
///
/// - `Menu`: confirm starts a session, quit exits
/// - `Playing`: frames go to the session; top-out or a blocked spawn moves to
///   `Ended`, quit goes back to `Menu`
/// - `Ended`: confirm goes back to `Menu`, quit exits
///
/// `now` is seconds on any monotonic clock; each session sees time relative to
/// the frame that started it.
///
/// # Example
///
/// ```
/// use blockfall_engine::{BagSeed, FlowControl, GameFlow, InputAction, InputState, Rules};
///
/// let mut flow = GameFlow::new(Rules::default(), Some(BagSeed::from_u64(3)));
/// assert!(flow.state().is_menu());
///
/// let confirm = InputState::only(InputAction::Confirm);
/// assert_eq!(flow.step(&confirm, &confirm, 0.0), FlowControl::Continue);
/// assert!(flow.state().is_playing());
///
/// let quit = InputState::only(InputAction::Quit);
/// flow.step(&quit, &quit, 1.0);
/// assert!(flow.state().is_menu());
/// assert_eq!(flow.step(&quit, &quit, 2.0), FlowControl::Exit);
/// ```
#[derive(Debug, Clone)]
pub struct GameFlow {
    rules: Rules,
    seed: Option<BagSeed>,
    state: GameState,
    session_started_at: f64,
    results: Vec<SessionResult>,
}

impl GameFlow {
    /// Creates a flow in the menu.
    ///
    /// With a fixed `seed` every session replays the same pieces; otherwise each
    /// session draws a random seed.
    #[must_use]
    pub fn new(rules: Rules, seed: Option<BagSeed>) -> Self {
        Self {
            rules,
            seed,
            state: GameState::Menu,
            session_started_at: 0.0,
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Sessions that have ended so far, oldest first.
    #[must_use]
    pub fn results(&self) -> &[SessionResult] {
        &self.results
    }

    pub fn step(&mut self, held: &InputState, pressed: &InputState, now: f64) -> FlowControl {
        let transition = match &mut self.state {
            GameState::Menu => Self::on_menu(pressed),
            GameState::Playing(session) => {
                Self::on_playing(session, held, pressed, now - self.session_started_at)
            }
            GameState::Ended { .. } => Self::on_ended(pressed),
        };

        match transition {
            Transition::Stay => {}
            Transition::Start => {
                let seed = self.seed.unwrap_or_else(|| rand::rng().random());
                let session = GameSession::start(self.rules.clone(), seed);
                self.session_started_at = now;
                self.state = match session.termination() {
                    Some(reason) => GameState::Ended {
                        session: Box::new(session),
                        reason,
                    },
                    None => GameState::Playing(Box::new(session)),
                };
            }
            Transition::End(reason) => {
                if let GameState::Playing(session) =
                    std::mem::replace(&mut self.state, GameState::Menu)
                {
                    self.results.push(SessionResult {
                        seed: session.seed(),
                        reason,
                        stats: session.stats().clone(),
                        elapsed: session.elapsed(),
                    });
                    if !reason.is_quit() {
                        self.state = GameState::Ended { session, reason };
                    }
                }
            }
            Transition::Enter(state) => self.state = state,
            Transition::Exit => return FlowControl::Exit,
        }
        FlowControl::Continue
    }

    fn on_menu(pressed: &InputState) -> Transition {
        if pressed.quit {
            Transition::Exit
        } else if pressed.confirm {
            Transition::Start
        } else {
            Transition::Stay
        }
    }

    fn on_playing(
        session: &mut GameSession,
        held: &InputState,
        pressed: &InputState,
        elapsed: f64,
    ) -> Transition {
        match session.advance(held, pressed, elapsed) {
            Advance::Continue => Transition::Stay,
            Advance::Terminated(reason) => Transition::End(reason),
        }
    }

    fn on_ended(pressed: &InputState) -> Transition {
        if pressed.quit {
            Transition::Exit
        } else if pressed.confirm {
            Transition::Enter(GameState::Menu)
        } else {
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::InputAction;

    use super::*;

    fn flow() -> GameFlow {
        GameFlow::new(Rules::default(), Some(BagSeed::from_u64(8)))
    }

    fn tap(flow: &mut GameFlow, action: InputAction, now: f64) -> FlowControl {
        let input = InputState::only(action);
        flow.step(&input, &input, now)
    }

    fn play_until_ended(flow: &mut GameFlow) {
        for frame in 1..200 {
            tap(flow, InputAction::HardDrop, f64::from(frame) / 64.0);
            if flow.state().is_ended() {
                return;
            }
        }
        panic!("session never ended: {:?}", flow.state());
    }

    #[test]
    fn test_menu_waits_for_confirm() {
        let mut flow = flow();
        assert_eq!(
            flow.step(&InputState::NONE, &InputState::NONE, 0.0),
            FlowControl::Continue
        );
        assert!(flow.state().is_menu());
        tap(&mut flow, InputAction::HardDrop, 0.1);
        assert!(flow.state().is_menu());
    }

    #[test]
    fn test_full_cycle_menu_playing_ended_menu() {
        let mut flow = flow();
        tap(&mut flow, InputAction::Confirm, 0.0);
        assert!(flow.state().is_playing());

        play_until_ended(&mut flow);
        let GameState::Ended { session, reason } = flow.state() else {
            unreachable!();
        };
        assert!(reason.is_top_out() || reason.is_spawn_blocked());
        assert_eq!(session.termination(), Some(*reason));
        assert_eq!(flow.results().len(), 1);
        assert_eq!(
            flow.results()[0].stats.completed_pieces(),
            session.stats().completed_pieces()
        );

        tap(&mut flow, InputAction::HardDrop, 10.0);
        assert!(flow.state().is_ended());
        tap(&mut flow, InputAction::Confirm, 10.0);
        assert!(flow.state().is_menu());
    }

    #[test]
    fn test_quit_while_playing_returns_to_menu() {
        let mut flow = flow();
        tap(&mut flow, InputAction::Confirm, 5.0);
        tap(&mut flow, InputAction::Quit, 6.5);
        assert!(flow.state().is_menu());

        let result = &flow.results()[0];
        assert_eq!(result.reason, Termination::Quit);
        assert!((result.elapsed - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_quit_exits_from_menu_and_ended() {
        let mut flow = flow();
        assert_eq!(tap(&mut flow, InputAction::Quit, 0.0), FlowControl::Exit);

        let mut flow = self::flow();
        tap(&mut flow, InputAction::Confirm, 0.0);
        play_until_ended(&mut flow);
        assert_eq!(tap(&mut flow, InputAction::Quit, 20.0), FlowControl::Exit);
    }

    #[test]
    fn test_session_time_starts_at_confirm() {
        let mut flow = flow();
        tap(&mut flow, InputAction::Confirm, 100.0);
        flow.step(&InputState::NONE, &InputState::NONE, 100.25);
        let GameState::Playing(session) = flow.state() else {
            unreachable!();
        };
        assert!((session.elapsed() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_seed_replays_pieces() {
        let mut flow = flow();
        let mut first_pieces = Vec::new();
        for round in 0..2 {
            let now = f64::from(round) * 10.0;
            tap(&mut flow, InputAction::Confirm, now);
            let GameState::Playing(session) = flow.state() else {
                unreachable!();
            };
            first_pieces.push(session.falling_piece().kind());
            tap(&mut flow, InputAction::Quit, now + 1.0);
        }
        assert_eq!(first_pieces[0], first_pieces[1]);
        assert_eq!(flow.results()[0].seed, flow.results()[1].seed);
    }
}
