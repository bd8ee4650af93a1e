use crate::{
    BagSeed, PieceCollisionError,
    core::{Board, Piece, PieceKind},
};

use super::{
    GameStats, InputState, Rules, UpcomingQueue,
    timing::{AutoShift, LockState},
};

/// Why a session ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum Termination {
    /// A piece locked with a cell above the visible field.
    #[display("topped out")]
    TopOut,
    /// A freshly spawned piece overlapped the stack.
    #[display("spawn blocked")]
    SpawnBlocked,
    /// The player asked to leave.
    #[display("quit")]
    Quit,
}

/// Outcome of one [`GameSession::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Advance {
    Continue,
    Terminated(Termination),
}

/// One game from the first spawn to termination.
///
/// The session owns the board, the falling piece, the upcoming queue and every
/// timer. It is advanced one frame at a time with the frame's input snapshots and
/// the seconds elapsed since the session started; it never reads a clock itself.
///
/// Within a frame the order is fixed:
///
/// 1. gravity, at the level's interval or the soft-drop interval
/// 2. lock-delay arbitration, which may lock the piece and spawn the next one
/// 3. delayed auto-shift from the held snapshot
/// 4. discrete actions from the pressed snapshot: left, right, rotations, hard drop
///
/// A frame that locks a piece in step 2 ends there.
#[derive(Debug, Clone)]
pub struct GameSession {
    rules: Rules,
    seed: BagSeed,
    board: Board,
    falling_piece: Piece,
    upcoming: UpcomingQueue,
    stats: GameStats,
    lock_state: LockState,
    auto_shift: AutoShift,
    last_drop_time: f64,
    elapsed: f64,
    termination: Option<Termination>,
}

impl GameSession {
    /// Starts a session on an empty board.
    #[must_use]
    pub fn start(rules: Rules, seed: BagSeed) -> Self {
        Self::with_board(rules, seed, Board::EMPTY)
    }

    /// Starts a session on a prepared board.
    ///
    /// If the first piece already collides, the session is created terminated with
    /// [`Termination::SpawnBlocked`].
    #[must_use]
    pub fn with_board(rules: Rules, seed: BagSeed, board: Board) -> Self {
        let mut upcoming = UpcomingQueue::with_seed(seed);
        let falling_piece = upcoming.dequeue();
        let termination = board
            .collides_piece(&falling_piece)
            .then_some(Termination::SpawnBlocked);
        Self {
            stats: GameStats::new(rules.starting_level, rules.lines_per_level),
            rules,
            seed,
            board,
            falling_piece,
            upcoming,
            lock_state: LockState::Falling,
            auto_shift: AutoShift::new(),
            last_drop_time: 0.0,
            elapsed: 0.0,
            termination,
        }
    }

    /// Seed of the piece sequence; starting again with it replays the same pieces.
    #[must_use]
    pub fn seed(&self) -> BagSeed {
        self.seed
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// Replaces the falling piece if it fits on the board.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.collides_piece(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Rows the falling piece can still fall before it lands.
    #[must_use]
    pub fn project(&self) -> i32 {
        self.board.drop_offset(&self.falling_piece)
    }

    /// The falling piece moved to where a hard drop would put it.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.falling_piece.moved(0, -self.project())
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().map(Piece::kind)
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Session time of the most recent frame, in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Runs one frame.
    ///
    /// `held` holds the keys that are down this frame and `pressed` the ones that
    /// went down since the previous frame. `elapsed` is seconds since the session
    /// started and must not go backwards. Once terminated, the session ignores
    /// input and keeps reporting the same termination.
    pub fn advance(&mut self, held: &InputState, pressed: &InputState, elapsed: f64) -> Advance {
        if let Some(reason) = self.termination {
            return Advance::Terminated(reason);
        }
        self.elapsed = elapsed;

        if pressed.quit {
            return self.terminate(Termination::Quit);
        }

        let interval = if held.soft_drop {
            self.rules.soft_drop_interval
        } else {
            self.rules.gravity_interval_at(self.stats.level())
        };
        if elapsed > self.last_drop_time + interval && self.try_move(0, -1).is_ok() {
            self.last_drop_time = elapsed;
        }

        let resting = self.is_resting();
        match self
            .lock_state
            .arbitrate(resting, elapsed, self.rules.lock_delay)
        {
            Some(state) => self.lock_state = state,
            None => return self.lock_and_spawn(),
        }

        let shift = self.auto_shift.update(
            held.move_left,
            held.move_right,
            elapsed,
            self.rules.das_delay,
            self.rules.das_repeat_interval,
        );
        if let Some(shift) = shift {
            self.try_manipulate(self.falling_piece.moved(shift.dx(), 0));
        }

        if pressed.move_left {
            self.try_manipulate(self.falling_piece.moved(-1, 0));
        }
        if pressed.move_right {
            self.try_manipulate(self.falling_piece.moved(1, 0));
        }
        if pressed.rotate_cw {
            self.try_manipulate(self.falling_piece.rotated(1));
        }
        if pressed.rotate_ccw {
            self.try_manipulate(self.falling_piece.rotated(3));
        }
        if pressed.rotate_180 {
            self.try_manipulate(self.falling_piece.rotated(2));
        }
        if pressed.hard_drop {
            self.falling_piece = self.ghost_piece();
            return self.lock_and_spawn();
        }

        Advance::Continue
    }

    fn is_resting(&self) -> bool {
        self.board.collides_piece(&self.falling_piece.moved(0, -1))
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.moved(dx, dy))
    }

    /// Applies a player move or rotation; a successful one restarts the lock delay.
    fn try_manipulate(&mut self, piece: Piece) {
        if self.set_falling_piece(piece).is_ok() && self.lock_state.is_locking() {
            self.lock_state = LockState::Falling;
        }
    }

    fn lock_and_spawn(&mut self) -> Advance {
        if self.board.lock(&self.falling_piece) {
            self.stats.complete_piece_drop(0);
            return self.terminate(Termination::TopOut);
        }
        let cleared_lines = self.board.clear_full_rows();
        self.stats.complete_piece_drop(cleared_lines);

        self.falling_piece = self.upcoming.dequeue();
        self.lock_state = LockState::Falling;
        self.last_drop_time = self.elapsed;
        if self.board.collides_piece(&self.falling_piece) {
            return self.terminate(Termination::SpawnBlocked);
        }
        Advance::Continue
    }

    fn terminate(&mut self, reason: Termination) -> Advance {
        self.termination = Some(reason);
        Advance::Terminated(reason)
    }
}
