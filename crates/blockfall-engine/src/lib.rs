//! Simulation core of a falling-block puzzle game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - pure data and geometry: piece kinds, 4×4 shapes and the rotation
//!   engine, the 10×40 board with its collision predicate, and the falling piece.
//! - [`engine`] - the frame-stepped game: 7-bag randomizer, upcoming queue,
//!   timing/lock/DAS state machine, the game session and the menu/playing/ended flow.
//!
//! Nothing in this crate reads a clock or touches a terminal. Time is passed in as
//! elapsed seconds, and input as two [`InputState`] snapshots per frame.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Advance, BagSeed, GameSession, InputState, Rules};
//!
//! let mut session = GameSession::start(Rules::default(), BagSeed::from_u64(7));
//!
//! let pressed = InputState {
//!     hard_drop: true,
//!     ..InputState::NONE
//! };
//! let outcome = session.advance(&InputState::NONE, &pressed, 0.016);
//!
//! assert_eq!(outcome, Advance::Continue);
//! assert_eq!(session.stats().completed_pieces(), 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BagSeedParseError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(#[error(not(source))] String),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RulesError {
    #[display("{_0} must be a finite, non-negative number of seconds")]
    InvalidDuration(#[error(not(source))] &'static str),
    #[display("starting level must be at least 1")]
    ZeroStartingLevel,
    #[display("lines per level must be at least 1")]
    ZeroLinesPerLevel,
}
