//! Frame-stepped game logic on top of the [`core`](crate::core) data structures.
//!
//! - [`BagRandomizer`] / [`BagSeed`] - seeded 7-bag piece generation
//! - [`UpcomingQueue`] - the two-bag preview queue
//! - [`InputState`] - per-frame control snapshots
//! - [`Rules`] - timing and level parameters, loadable from JSON
//! - [`LockState`] / [`AutoShift`] - lock-delay and delayed auto-shift timers
//! - [`GameSession`] - one game: gravity, locking, line clears, termination
//! - [`GameStats`] - score, lines and level of a session
//! - [`GameFlow`] - menu, playing and ended states around sessions
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Advance, BagSeed, GameSession, InputAction, InputState, Rules};
//!
//! let mut session = GameSession::start(Rules::default(), BagSeed::from_u64(42));
//! let first = *session.falling_piece();
//!
//! // Nothing happens until gravity is due
//! session.advance(&InputState::NONE, &InputState::NONE, 0.5);
//! assert_eq!(session.falling_piece(), &first);
//!
//! session.advance(&InputState::NONE, &InputState::NONE, 0.9);
//! assert_eq!(session.falling_piece().y(), first.y() - 1);
//!
//! let drop = InputState::only(InputAction::HardDrop);
//! assert_eq!(session.advance(&drop, &drop, 1.0), Advance::Continue);
//! assert_eq!(session.stats().completed_pieces(), 1);
//! ```

pub use self::{
    bag::*, game_flow::*, game_session::*, game_stats::*, input::*, rules::*, timing::*,
    upcoming_queue::*,
};

mod bag;
mod game_flow;
mod game_session;
mod game_stats;
mod input;
mod rules;
mod timing;
mod upcoming_queue;
