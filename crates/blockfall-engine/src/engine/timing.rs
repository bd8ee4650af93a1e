//! Lock-delay and horizontal auto-repeat timers.
//!
//! Both are pure state machines over the frame's elapsed time; neither touches
//! the board. The session asks the board whether the piece is resting or whether
//! a shift fits, and feeds the answers in.

/// Lock phase of the falling piece.
///
/// Locking itself is not a state: when the delay runs out the piece is written to
/// the board and the next piece spawns in [`LockState::Falling`] within the same
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum LockState {
    /// The piece is in the air, or was moved off its resting spot.
    Falling,
    /// The piece has rested since `since` and locks once the delay has passed.
    Locking { since: f64 },
}

impl LockState {
    /// Advances the lock phase given whether the piece is resting on something.
    ///
    /// Returns `None` when the piece must lock now.
    #[must_use]
    pub fn arbitrate(self, resting: bool, elapsed: f64, lock_delay: f64) -> Option<Self> {
        match (self, resting) {
            (_, false) => Some(Self::Falling),
            (Self::Falling, true) => Some(Self::Locking { since: elapsed }),
            (Self::Locking { since }, true) if elapsed > since + lock_delay => None,
            (state @ Self::Locking { .. }, true) => Some(state),
        }
    }
}

/// Direction of a horizontal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Delayed auto-shift: turns a held direction into repeated moves.
///
/// Each direction has its own charge timer, started on the first frame the key
/// is held and cleared on release. A direction held for longer than the DAS
/// delay repeats every repeat interval. The repeat clock is shared, so holding
/// both directions still yields at most one move per interval; the direction
/// pressed most recently wins, and left wins a tie.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoShift {
    left_since: Option<f64>,
    right_since: Option<f64>,
    last_repeat: f64,
}

impl Default for AutoShift {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoShift {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left_since: None,
            right_since: None,
            last_repeat: f64::NEG_INFINITY,
        }
    }

    /// Updates both timers from the held keys and returns the shift due now, if any.
    pub fn update(
        &mut self,
        left_held: bool,
        right_held: bool,
        elapsed: f64,
        das_delay: f64,
        repeat_interval: f64,
    ) -> Option<Shift> {
        Self::charge(&mut self.left_since, left_held, elapsed);
        Self::charge(&mut self.right_since, right_held, elapsed);

        let charged = |since: Option<f64>| since.filter(|since| elapsed - since > das_delay);
        let shift = match (charged(self.left_since), charged(self.right_since)) {
            (None, None) => return None,
            (Some(_), None) => Shift::Left,
            (None, Some(_)) => Shift::Right,
            (Some(left), Some(right)) if right > left => Shift::Right,
            (Some(_), Some(_)) => Shift::Left,
        };
        if elapsed - self.last_repeat < repeat_interval {
            return None;
        }
        self.last_repeat = elapsed;
        Some(shift)
    }

    fn charge(since: &mut Option<f64>, held: bool, elapsed: f64) {
        if held {
            since.get_or_insert(elapsed);
        } else {
            *since = None;
        }
    }
}
