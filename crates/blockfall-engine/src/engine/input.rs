/// One snapshot of the player's controls.
///
/// Each frame receives two snapshots: the keys currently *held*, and the keys
/// *pressed* since the previous frame. Key auto-repeat from the terminal is not
/// part of either; horizontal repeat is generated by the session's DAS timers.
#[expect(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InputState {
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub rotate_180: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Part of the input contract; the session does not act on it.
    pub hold: bool,
    pub confirm: bool,
    pub quit: bool,
}

impl InputState {
    pub const NONE: Self = Self {
        rotate_cw: false,
        rotate_ccw: false,
        rotate_180: false,
        soft_drop: false,
        hard_drop: false,
        move_left: false,
        move_right: false,
        hold: false,
        confirm: false,
        quit: false,
    };

    /// Returns a snapshot with only `action` set.
    #[must_use]
    pub fn only(action: InputAction) -> Self {
        let mut state = Self::NONE;
        state.set(action, true);
        state
    }

    #[must_use]
    pub fn get(&self, action: InputAction) -> bool {
        *self.flag(action)
    }

    pub fn set(&mut self, action: InputAction, value: bool) {
        *self.flag_mut(action) = value;
    }

    fn flag(&self, action: InputAction) -> &bool {
        match action {
            InputAction::RotateCw => &self.rotate_cw,
            InputAction::RotateCcw => &self.rotate_ccw,
            InputAction::Rotate180 => &self.rotate_180,
            InputAction::SoftDrop => &self.soft_drop,
            InputAction::HardDrop => &self.hard_drop,
            InputAction::MoveLeft => &self.move_left,
            InputAction::MoveRight => &self.move_right,
            InputAction::Hold => &self.hold,
            InputAction::Confirm => &self.confirm,
            InputAction::Quit => &self.quit,
        }
    }

    fn flag_mut(&mut self, action: InputAction) -> &mut bool {
        match action {
            InputAction::RotateCw => &mut self.rotate_cw,
            InputAction::RotateCcw => &mut self.rotate_ccw,
            InputAction::Rotate180 => &mut self.rotate_180,
            InputAction::SoftDrop => &mut self.soft_drop,
            InputAction::HardDrop => &mut self.hard_drop,
            InputAction::MoveLeft => &mut self.move_left,
            InputAction::MoveRight => &mut self.move_right,
            InputAction::Hold => &mut self.hold,
            InputAction::Confirm => &mut self.confirm,
            InputAction::Quit => &mut self.quit,
        }
    }
}

/// A single control, used by front-ends to map keys onto [`InputState`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InputAction {
    #[display("rotate clockwise")]
    RotateCw,
    #[display("rotate counterclockwise")]
    RotateCcw,
    #[display("rotate 180")]
    Rotate180,
    #[display("soft drop")]
    SoftDrop,
    #[display("hard drop")]
    HardDrop,
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("hold")]
    Hold,
    #[display("confirm")]
    Confirm,
    #[display("quit")]
    Quit,
}

impl InputAction {
    pub const ALL: [Self; 10] = [
        Self::RotateCw,
        Self::RotateCcw,
        Self::Rotate180,
        Self::SoftDrop,
        Self::HardDrop,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Hold,
        Self::Confirm,
        Self::Quit,
    ];
}
