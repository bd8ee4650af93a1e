//! Board geometry, piece shapes and the rotation engine.
//!
//! Coordinates follow a bottom-up convention: row 0 is the floor of the board and
//! `y` grows upward. A shape's local row `i` walks downward from its reference
//! corner, so a shape cell `(i, j)` placed at `(x, y)` lands on column `x + j`,
//! row `y - i`.

pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board, including the hidden buffer above the visible field.
pub const BOARD_HEIGHT: usize = 40;
/// Number of rows a player can see; anything locked at or above this row tops out.
pub const VISIBLE_HEIGHT: usize = 20;

/// Column of a freshly spawned piece's reference corner.
pub const SPAWN_X: i32 = 3;
/// Row of a freshly spawned piece's reference corner.
pub const SPAWN_Y: i32 = 20;
