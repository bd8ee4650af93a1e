use super::{
    SPAWN_X, SPAWN_Y,
    shape::{PieceKind, Rotation, Shape, rotate},
};

/// A tetromino placed on the board: kind, rotation state and grid position.
///
/// Pieces are plain values. Movement and rotation return a new `Piece`, and the
/// caller decides whether to keep it after asking the board about collisions.
///
/// # Coordinate System
///
/// - `(x, y)` is the board cell under the top-left corner of the 4×4 shape box
/// - `y` increases upward, so falling decreases `y`
/// - The shape is always derived from the kind's spawn shape and the accumulated
///   rotation, never by rotating an already rotated shape
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T);
/// assert_eq!((piece.x(), piece.y()), (3, 20));
///
/// let moved = piece.moved(-1, -2).rotated(1);
/// assert_eq!((moved.x(), moved.y()), (2, 18));
/// assert_eq!(moved.rotation().quarter_turns(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a spawn-ready piece at the spawn position in its spawn orientation.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y)
    }

    #[must_use]
    pub const fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: Rotation::SPAWN,
            shape: kind.base_shape(),
            x,
            y,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    #[must_use]
    pub fn rotated(self, quarter_turns: u8) -> Self {
        let rotation = self.rotation.turned(quarter_turns);
        Self {
            rotation,
            shape: rotate(self.kind.base_shape(), self.kind, rotation.quarter_turns()),
            ..self
        }
    }

    /// Returns the absolute `(column, row)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(i, j)| (self.x + i32::from(j), self.y - i32::from(i)))
    }
}
